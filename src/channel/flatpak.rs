use anyhow::Result;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::cmd::{CommandLine, Runner};
use crate::distro::PackageManagerKind;

/// Remotes a Flatpak app may be installed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlatpakRemote {
    Fedora,
    FlatHub,
}

impl FlatpakRemote {
    /// Remote name as registered with `flatpak remote-add`
    pub fn id(&self) -> &'static str {
        match self {
            FlatpakRemote::Fedora => "fedora",
            FlatpakRemote::FlatHub => "flathub",
        }
    }
}

impl fmt::Display for FlatpakRemote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlatpakRemote::Fedora => f.write_str("Fedora"),
            FlatpakRemote::FlatHub => f.write_str("FlatHub"),
        }
    }
}

/// Flatpak descriptor of a catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Flatpak {
    /// Application ID, e.g. `org.gnome.Maps`
    pub id: String,
    pub remotes: Vec<FlatpakRemote>,
}

impl Flatpak {
    pub fn new(id: impl Into<String>, remotes: &[FlatpakRemote]) -> Self {
        Self {
            id: id.into(),
            remotes: remotes.to_vec(),
        }
    }

    pub fn install_command(&self, remote: FlatpakRemote) -> CommandLine {
        CommandLine::new("flatpak", ["install", remote.id(), &self.id, "-y"])
    }

    pub fn uninstall_command(&self) -> CommandLine {
        CommandLine::new("flatpak", ["remove", &self.id, "-y"])
    }
}

/// Application IDs from `flatpak list --app` (second tab-separated column)
pub fn parse_installed(output: &str) -> BTreeSet<String> {
    output
        .lines()
        .filter_map(|line| line.split('\t').nth(1))
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn installed(runner: &dyn Runner) -> Result<BTreeSet<String>> {
    if !runner.exists("flatpak") {
        return Ok(BTreeSet::new());
    }

    let output = runner.output(&CommandLine::new("flatpak", ["list", "--app"]))?;
    Ok(parse_installed(&output))
}

/// Register the remotes this tool installs from
pub fn setup(runner: &dyn Runner, manager: PackageManagerKind) -> Result<()> {
    runner.run(
        &CommandLine::new(
            "flatpak",
            [
                "remote-add",
                "--if-not-exists",
                "flathub",
                "https://flathub.org/repo/flathub.flatpakrepo",
            ],
        )
        .quiet(),
    )?;

    if manager == PackageManagerKind::Dnf {
        runner.run(
            &CommandLine::new(
                "flatpak",
                [
                    "remote-add",
                    "--if-not-exists",
                    "fedora",
                    "oci+https://registry.fedoraproject.org",
                ],
            )
            .quiet(),
        )?;
    }

    Ok(())
}

pub fn update_command() -> CommandLine {
    CommandLine::new("flatpak", ["update", "-y"])
}

/// Remove runtimes no installed app needs anymore
pub fn autoremove_command() -> CommandLine {
    CommandLine::new("flatpak", ["remove", "--unused", "-y"])
}
