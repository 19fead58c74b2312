use super::dnf::strip_rpm_version;
use super::{sudo, PackageManager};
use crate::cmd::CommandLine;

/// rpm-ostree (Fedora Silverblue). Changes land in the next deployment.
#[derive(Debug, Clone, Default)]
pub struct RpmOsTree;

impl RpmOsTree {
    pub fn new() -> Self {
        Self
    }
}

impl PackageManager for RpmOsTree {
    fn name(&self) -> &str {
        "rpm-ostree"
    }

    fn list_command(&self) -> CommandLine {
        CommandLine::new("rpm", ["-qa"])
    }

    fn parse_installed(&self, line: &str) -> Option<String> {
        strip_rpm_version(line)
    }

    fn install_command(&self, packages: &[&str]) -> CommandLine {
        sudo(&["rpm-ostree", "install", "--idempotent", "-y"], packages)
    }

    fn remove_command(&self, packages: &[&str]) -> CommandLine {
        sudo(&["rpm-ostree", "uninstall", "--idempotent"], packages)
    }

    fn refresh_command(&self) -> CommandLine {
        sudo(&["rpm-ostree", "refresh-md"], &[])
    }

    fn upgrade_commands(&self) -> Vec<CommandLine> {
        vec![sudo(&["rpm-ostree", "upgrade"], &[])]
    }

    fn autoremove_command(&self) -> CommandLine {
        sudo(&["rpm-ostree", "cleanup", "--base"], &[])
    }
}
