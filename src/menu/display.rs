//! Menu labels. The only place that knows about colour.

use crossterm::style::Stylize;

use crate::catalog::Package;
use crate::channel::FlatpakRemote;
use crate::distribution::{Distribution, InstallMethod};

pub const BACK: &str = "Back";

pub fn method_label(method: InstallMethod, package: &Package, active: InstallMethod) -> String {
    let mut label = match method {
        InstallMethod::Repository => "Repository".green().to_string(),
        InstallMethod::Flatpak => "Flatpak".blue().to_string(),
        InstallMethod::Snap => {
            let mut label = "Snap".magenta().to_string();
            if let Some(snap) = &package.snap {
                if snap.official {
                    label.push_str(" - Official");
                }
                if snap.classic {
                    label.push_str(&format!(" {}", "(classic)".dark_yellow()));
                }
            }
            label
        }
        InstallMethod::Other => match package.other {
            Some(other) => format!("{} ({})", "Other".dark_yellow(), other),
            None => "Other".dark_yellow().to_string(),
        },
        InstallMethod::Uninstall => "Uninstall".red().to_string(),
        InstallMethod::None => BACK.to_string(),
    };

    if method != InstallMethod::None && method == active {
        label.push_str(&format!(" {}", "(installed)".cyan()));
    }

    label
}

/// Name (dimmed when its desktop is missing) plus install status
pub fn package_label(package: &Package, dist: &Distribution) -> String {
    let name = match package.desktop {
        Some(desktop) if !dist.desktops().contains(&desktop) => {
            package.name.as_str().dark_yellow().to_string()
        }
        _ => package.name.clone(),
    };

    let status = match dist.install_method(package) {
        InstallMethod::Repository => "(repository installed)".green(),
        InstallMethod::Flatpak => "(flatpak installed)".blue(),
        InstallMethod::Snap => "(snap installed)".magenta(),
        InstallMethod::Other => "(other installed)".dark_yellow(),
        InstallMethod::Uninstall | InstallMethod::None => "(uninstalled)".red(),
    };

    format!("{} {}", name, status)
}

pub fn remote_label(remote: &FlatpakRemote) -> String {
    remote.to_string()
}
