use anyhow::Result;

use super::{sudo, PackageManager};
use crate::cmd::{CommandLine, Exit, Runner};

/// Pacman package manager (Arch Linux)
#[derive(Debug, Clone, Default)]
pub struct Pacman;

impl Pacman {
    pub fn new() -> Self {
        Self
    }

    /// Orphaned dependencies, one name per line
    fn orphans_command(&self) -> CommandLine {
        CommandLine::new("pacman", ["-Qdtq"])
    }
}

impl PackageManager for Pacman {
    fn name(&self) -> &str {
        "pacman"
    }

    fn list_command(&self) -> CommandLine {
        CommandLine::new("pacman", ["-Q"])
    }

    fn parse_installed(&self, line: &str) -> Option<String> {
        line.split_whitespace().next().map(str::to_string)
    }

    fn install_command(&self, packages: &[&str]) -> CommandLine {
        sudo(&["pacman", "-S", "--noconfirm", "--needed"], packages)
    }

    fn remove_command(&self, packages: &[&str]) -> CommandLine {
        sudo(&["pacman", "-Rns", "--noconfirm"], packages)
    }

    fn refresh_command(&self) -> CommandLine {
        sudo(&["pacman", "-Sy"], &[])
    }

    fn upgrade_commands(&self) -> Vec<CommandLine> {
        vec![sudo(&["pacman", "-Syu", "--noconfirm"], &[])]
    }

    /// Reads targets from stdin (`-`)
    fn autoremove_command(&self) -> CommandLine {
        sudo(&["pacman", "-Rns", "--noconfirm", "-"], &[])
    }

    /// pacman has no autoremove flag: feed the orphan list into `-Rns -`
    fn autoremove(&self, runner: &dyn Runner) -> Result<Exit> {
        let orphans = runner.output(&self.orphans_command())?;
        if orphans.trim().is_empty() {
            tracing::info!("no orphaned packages to remove");
            return Ok(Exit::SUCCESS);
        }

        runner.run_with_stdin(&self.autoremove_command(), orphans.as_bytes())
    }
}
