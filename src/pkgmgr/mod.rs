mod apt;
mod dnf;
mod pacman;
mod rpm_ostree;

pub use apt::Apt;
pub use dnf::Dnf;
pub use pacman::Pacman;
pub use rpm_ostree::RpmOsTree;

use anyhow::Result;
use std::collections::BTreeSet;

use crate::cmd::{CommandLine, Exit, Runner};
use crate::distro::PackageManagerKind;

/// Package manager trait for the native repository channel.
///
/// Implementations only describe commands; the aggregate decides when to run
/// them and how to record the outcome.
pub trait PackageManager: Send + Sync {
    /// Name of the package manager (e.g., "apt", "dnf", "pacman")
    fn name(&self) -> &str;

    /// Command listing installed packages, one per line
    fn list_command(&self) -> CommandLine;

    /// Extract a package name from one line of `list_command` output
    fn parse_installed(&self, line: &str) -> Option<String>;

    /// Install packages without asking for confirmation
    fn install_command(&self, packages: &[&str]) -> CommandLine;

    /// Remove packages without asking for confirmation
    fn remove_command(&self, packages: &[&str]) -> CommandLine;

    /// Refresh repository metadata without upgrading anything
    fn refresh_command(&self) -> CommandLine;

    /// Full system upgrade, in order
    fn upgrade_commands(&self) -> Vec<CommandLine>;

    /// Command that removes orphaned dependencies
    fn autoremove_command(&self) -> CommandLine;

    /// Remove orphaned dependencies
    fn autoremove(&self, runner: &dyn Runner) -> Result<Exit> {
        runner.run(&self.autoremove_command())
    }

    /// Query the set of installed package names
    fn list_installed(&self, runner: &dyn Runner) -> Result<BTreeSet<String>> {
        let output = runner.output(&self.list_command())?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| self.parse_installed(line))
            .collect())
    }
}

impl PackageManagerKind {
    pub fn create(self) -> Box<dyn PackageManager> {
        match self {
            PackageManagerKind::Apt => Box::new(Apt::new()),
            PackageManagerKind::Dnf => Box::new(Dnf::new()),
            PackageManagerKind::Pacman => Box::new(Pacman::new()),
            PackageManagerKind::RpmOsTree => Box::new(RpmOsTree::new()),
        }
    }
}

pub(crate) fn sudo(base: &[&str], packages: &[&str]) -> CommandLine {
    CommandLine::new("sudo", base.iter().copied()).args(packages.iter().copied())
}
