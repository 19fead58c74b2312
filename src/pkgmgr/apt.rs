use super::{sudo, PackageManager};
use crate::cmd::CommandLine;

/// Apt package manager (Debian, Ubuntu, Mint)
#[derive(Debug, Clone, Default)]
pub struct Apt;

impl Apt {
    pub fn new() -> Self {
        Self
    }
}

impl PackageManager for Apt {
    fn name(&self) -> &str {
        "apt"
    }

    fn list_command(&self) -> CommandLine {
        CommandLine::new(
            "dpkg-query",
            ["--show", "--showformat=${db:Status-Abbrev} ${binary:Package}\\n"],
        )
    }

    /// `ii  libc6:amd64`. Removed packages linger as `rc` until purged and
    /// do not count. Multi-arch names lose their `:amd64` style suffix.
    fn parse_installed(&self, line: &str) -> Option<String> {
        let mut fields = line.split_whitespace();
        if !fields.next()?.starts_with("ii") {
            return None;
        }
        let name = fields.next()?.split(':').next()?;
        (!name.is_empty()).then(|| name.to_string())
    }

    fn refresh_command(&self) -> CommandLine {
        sudo(&["apt", "update"], &[])
    }

    fn install_command(&self, packages: &[&str]) -> CommandLine {
        sudo(&["apt", "install", "-y"], packages)
    }

    fn remove_command(&self, packages: &[&str]) -> CommandLine {
        sudo(&["apt", "remove", "-y"], packages)
    }

    fn upgrade_commands(&self) -> Vec<CommandLine> {
        vec![
            self.refresh_command(),
            sudo(&["apt", "full-upgrade", "-Vy"], &[]),
        ]
    }

    fn autoremove_command(&self) -> CommandLine {
        sudo(&["apt", "autoremove", "-y"], &[])
    }
}
