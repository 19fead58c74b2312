use super::{sudo, PackageManager};
use crate::cmd::CommandLine;

/// Dnf package manager (Fedora, Alma, CentOS)
#[derive(Debug, Clone, Default)]
pub struct Dnf;

impl Dnf {
    pub fn new() -> Self {
        Self
    }
}

/// `rpm -qa` prints `name-version-release.arch`; keep only the name.
pub(crate) fn strip_rpm_version(line: &str) -> Option<String> {
    let mut parts = line.trim().rsplitn(3, '-');
    let _release = parts.next()?;
    let _version = parts.next()?;
    let name = parts.next()?;
    (!name.is_empty()).then(|| name.to_string())
}

impl PackageManager for Dnf {
    fn name(&self) -> &str {
        "dnf"
    }

    fn list_command(&self) -> CommandLine {
        CommandLine::new("rpm", ["-qa"])
    }

    fn parse_installed(&self, line: &str) -> Option<String> {
        strip_rpm_version(line)
    }

    fn install_command(&self, packages: &[&str]) -> CommandLine {
        sudo(&["dnf", "install", "-y"], packages)
    }

    fn remove_command(&self, packages: &[&str]) -> CommandLine {
        sudo(&["dnf", "remove", "-y"], packages)
    }

    fn refresh_command(&self) -> CommandLine {
        sudo(&["dnf", "makecache"], &[])
    }

    fn upgrade_commands(&self) -> Vec<CommandLine> {
        vec![sudo(&["dnf", "upgrade", "--refresh", "-y"], &[])]
    }

    fn autoremove_command(&self) -> CommandLine {
        sudo(&["dnf", "autoremove", "-y"], &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_version_and_arch() {
        assert_eq!(
            strip_rpm_version("git-2.43.0-1.fc39.x86_64"),
            Some("git".into())
        );
        assert_eq!(
            strip_rpm_version("golang-x-tools-gopls-0.14.2-1.fc39.x86_64"),
            Some("golang-x-tools-gopls".into())
        );
        assert_eq!(
            strip_rpm_version("gpg-pubkey-18b8e74c-62f2920f"),
            Some("gpg-pubkey".into())
        );
    }

    #[test]
    fn malformed_lines_are_skipped() {
        assert_eq!(strip_rpm_version("bash"), None);
        assert_eq!(strip_rpm_version("bash-5.2"), None);
    }

    #[test]
    fn upgrade_refreshes_metadata() {
        let cmds = Dnf::new().upgrade_commands();
        assert_eq!(cmds.len(), 1);
        assert_eq!(cmds[0].to_string(), "sudo dnf upgrade --refresh -y");
    }
}
