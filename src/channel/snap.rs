use anyhow::Result;
use serde::Deserialize;
use std::collections::BTreeSet;

use crate::cmd::{CommandLine, Exit, Runner};
use crate::distro::PackageManagerKind;

/// Snap descriptor of a catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snap {
    pub name: String,
    /// Published by the upstream project (display only)
    #[serde(default)]
    pub official: bool,
    /// Needs `--classic` confinement
    #[serde(default)]
    pub classic: bool,
    #[serde(default)]
    pub channel: Option<String>,
}

impl Snap {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            official: false,
            classic: false,
            channel: None,
        }
    }

    pub fn official(mut self) -> Self {
        self.official = true;
        self
    }

    pub fn classic(mut self) -> Self {
        self.classic = true;
        self
    }

    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn install_command(&self) -> CommandLine {
        let mut cmd = CommandLine::new("sudo", ["snap", "install", &self.name]);
        if self.classic {
            cmd = cmd.arg("--classic");
        }
        if let Some(channel) = self.channel.as_deref().filter(|c| !c.is_empty()) {
            cmd = cmd.args(["--channel", channel]);
        }
        cmd
    }

    pub fn uninstall_command(&self) -> CommandLine {
        CommandLine::new("sudo", ["snap", "remove", &self.name])
    }
}

/// Snap names from `snap list` (first column, header skipped)
pub fn parse_installed(output: &str) -> BTreeSet<String> {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter(|name| *name != "Name")
        .map(str::to_string)
        .collect()
}

pub fn installed(runner: &dyn Runner) -> Result<BTreeSet<String>> {
    if !runner.exists("snap") {
        return Ok(BTreeSet::new());
    }

    let output = runner.output(&CommandLine::new("snap", ["list"]))?;
    Ok(parse_installed(&output))
}

/// Fedora ships snapd without its socket enabled or the /snap symlink.
///
/// Returns how enabling the socket went. The symlink is best effort: it
/// already exists after the first run.
pub fn setup(runner: &dyn Runner, manager: PackageManagerKind) -> Result<Exit> {
    if manager != PackageManagerKind::Dnf {
        return Ok(Exit::SUCCESS);
    }

    let exit = runner.run(&CommandLine::new(
        "sudo",
        ["systemctl", "enable", "--now", "snapd.socket"],
    ))?;
    runner.run(&CommandLine::new("sudo", ["ln", "-s", "/var/lib/snapd/snap", "/snap"]).quiet())?;

    Ok(exit)
}

pub fn update_command() -> CommandLine {
    CommandLine::new("sudo", ["snap", "refresh"])
}
