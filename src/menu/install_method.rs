//! Switching a package between channels.
//!
//! Every transition first removes the package from all other channels it
//! supports, so at most one channel holds it afterwards.

use anyhow::Result;

use super::{display, flatpak_remote, select};
use crate::catalog::Package;
use crate::distribution::{Distribution, InstallMethod};
use crate::hooks;
use crate::prompt::Prompter;

/// Loop over the install-method menu until Back
pub fn choose(dist: &mut Distribution, package: &Package, prompter: &mut dyn Prompter) -> Result<()> {
    let options = dist.install_method_options(package);

    loop {
        let active = dist.install_method(package);
        let labels: Vec<String> = options
            .iter()
            .map(|method| display::method_label(*method, package, active))
            .collect();

        let selected = select(prompter, "Choose an Install Method", &options, &labels)?;
        if selected == InstallMethod::None {
            return Ok(());
        }

        transition(dist, package, selected, prompter)?;
    }
}

pub fn transition(
    dist: &mut Distribution,
    package: &Package,
    selected: InstallMethod,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    tracing::info!("switching {} to {:?}", package.name, selected);

    for method in dist.install_method_options(package) {
        if method.is_channel() && method != selected {
            dist.remove_via(method, package)?;
        }
    }

    if let Some(hook) = package.pre_install {
        hooks::run(hook, dist, selected)?;
    }

    match selected {
        InstallMethod::Repository => dist.install_package(package)?,
        InstallMethod::Flatpak => {
            if let Some(app) = &package.flatpak {
                flatpak_remote::choose(dist, app, prompter)?;
            }
        }
        InstallMethod::Snap => {
            if let Some(snap) = &package.snap {
                dist.install_snap(snap)?;
            }
        }
        InstallMethod::Other => {
            if let Some(other) = package.other {
                dist.install_other(other)?;
            }
        }
        InstallMethod::Uninstall | InstallMethod::None => {}
    }

    if let Some(hook) = package.post_install {
        hooks::run(hook, dist, selected)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{Flatpak, FlatpakRemote, OtherPackage, Snap};
    use crate::distribution::testing::fixture;
    use crate::distro::{DistroName, Repository};
    use crate::hooks::HookId;
    use crate::prompt::scripted::Scripted;

    fn node() -> Package {
        Package::new("Node.js - JavaScript RE")
            .repository(Repository::Ubuntu, &["nodejs", "npm"])
            .repository(Repository::RedHat, &["nodejs", "npm"])
            .flatpak(Flatpak::new("org.example.Node", &[FlatpakRemote::FlatHub]))
            .snap(Snap::new("node").official().classic().channel("18/stable"))
    }

    #[test]
    fn switching_channels_leaves_one_active() {
        let (mut dist, runner) = fixture(DistroName::Ubuntu);
        dist.inventory_mut().snap.insert("node".into());
        let node = node();

        transition(&mut dist, &node, InstallMethod::Repository, &mut Scripted::new()).unwrap();

        assert_eq!(dist.install_method(&node), InstallMethod::Repository);
        assert!(dist.inventory().snap.is_empty());
        assert_eq!(
            runner.calls(),
            vec!["sudo snap remove node", "sudo apt install -y nodejs npm"]
        );
    }

    #[test]
    fn uninstall_from_snap() {
        let (mut dist, runner) = fixture(DistroName::Ubuntu);
        dist.inventory_mut().snap.insert("node".into());
        dist.inventory_mut().repository.insert("bash".into());
        let node = node();

        transition(&mut dist, &node, InstallMethod::Uninstall, &mut Scripted::new()).unwrap();

        assert_eq!(dist.install_method(&node), InstallMethod::None);
        assert_eq!(runner.calls(), vec!["sudo snap remove node"]);
        assert!(dist.inventory().repository.contains("bash"));
    }

    #[test]
    fn hooks_wrap_the_install() {
        let (mut dist, runner) = fixture(DistroName::CentOS);
        let node = node().hooks(Some(HookId::NodejsModuleStream), Some(HookId::SnapdSetup));

        transition(&mut dist, &node, InstallMethod::Repository, &mut Scripted::new()).unwrap();

        assert_eq!(
            runner.calls(),
            vec![
                "sudo dnf module enable nodejs:20 -y",
                "sudo dnf install -y nodejs npm",
                "sudo systemctl enable --now snapd.socket",
                "sudo ln -s /var/lib/snapd/snap /snap",
            ]
        );
    }

    #[test]
    fn other_channel_removed_when_leaving_it() {
        let (mut dist, runner) = fixture(DistroName::Debian);
        dist.inventory_mut().other.insert(OtherPackage::Rust);
        let rust = Package::new("Rust Language")
            .repository(Repository::Debian, &["rustc", "cargo"])
            .other(OtherPackage::Rust);

        transition(&mut dist, &rust, InstallMethod::Repository, &mut Scripted::new()).unwrap();

        assert!(dist.inventory().other.is_empty());
        assert_eq!(dist.install_method(&rust), InstallMethod::Repository);
        assert_eq!(runner.calls(), vec!["sudo apt install -y rustc cargo"]);
    }

    #[test]
    fn menu_loop_marks_active_method() {
        let (mut dist, runner) = fixture(DistroName::Arch);
        let discord = Package::new("Discord").snap(Snap::new("discord"));
        let mut prompter = Scripted::new().pick("Snap").pick("Back");

        choose(&mut dist, &discord, &mut prompter).unwrap();

        assert_eq!(runner.calls(), vec!["sudo snap install discord"]);
        let (_, first) = &prompter.shown[0];
        let (_, second) = &prompter.shown[1];
        assert_eq!(first.len(), 3);
        assert!(!first[0].contains("(installed)"));
        assert!(second[0].contains("(installed)"));
    }

    #[test]
    fn flatpak_selection_uses_remote_menu() {
        let (mut dist, runner) = fixture(DistroName::Ubuntu);
        let node = node();
        let mut prompter = Scripted::new().pick("Flatpak").pick("Back");

        choose(&mut dist, &node, &mut prompter).unwrap();

        assert_eq!(dist.install_method(&node), InstallMethod::Flatpak);
        assert_eq!(
            runner.calls().last().unwrap(),
            "flatpak install flathub org.example.Node -y"
        );
    }
}
