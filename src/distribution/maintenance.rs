use anyhow::Result;
use std::fs;

use super::Distribution;
use crate::channel::{flatpak, snap, OtherPackage};
use crate::cmd::CommandLine;
use crate::distro::{PackageManagerKind, Repository};
use crate::prompt::Prompter;

const PARALLEL_DOWNLOADS: &str = "max_parallel_downloads";

/// RPM Fusion tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fusion {
    Free,
    NonFree,
}

impl Fusion {
    fn package(&self) -> &'static str {
        match self {
            Fusion::Free => "rpmfusion-free-release",
            Fusion::NonFree => "rpmfusion-nonfree-release",
        }
    }

    fn path(&self) -> &'static str {
        match self {
            Fusion::Free => "free",
            Fusion::NonFree => "nonfree",
        }
    }
}

impl Distribution {
    /// Full system upgrade across every channel that is present
    pub fn update(&self) -> Result<()> {
        for command in self.manager.upgrade_commands() {
            self.run_checked(&command)?;
        }

        if self.runner.exists("flatpak") {
            self.run_checked(&flatpak::update_command())?;
        }
        if self.runner.exists("snap") {
            self.run_checked(&snap::update_command())?;
        }
        for package in OtherPackage::ALL {
            if !package.is_present(self.runner.as_ref()) {
                continue;
            }
            for command in package.update_commands() {
                self.run_checked(&command)?;
            }
        }

        Ok(())
    }

    /// Reload repository metadata, e.g. after adding a repository
    pub fn refresh(&self) -> Result<()> {
        self.run_checked(&self.manager.refresh_command())
    }

    /// Remove orphaned native packages and unused Flatpak runtimes
    pub fn autoremove(&self) -> Result<()> {
        let exit = self.manager.autoremove(self.runner.as_ref())?;
        self.check(self.manager.autoremove_command(), exit)?;

        if self.runner.exists("flatpak") {
            self.run_checked(&flatpak::autoremove_command())?;
        }

        Ok(())
    }

    /// One-time dnf tuning and optional RPM Fusion repositories
    pub fn repository_setup(&mut self, prompter: &mut dyn Prompter) -> Result<()> {
        if self.env.package_manager != PackageManagerKind::Dnf {
            println!("Nothing to set up for {}", self.manager.name());
            return Ok(());
        }

        self.enable_parallel_downloads()?;

        if !prompter.confirm("Enable RPM Fusion (free)?", false)? {
            return Ok(());
        }
        self.enable_rpm_fusion(Fusion::Free)?;

        if prompter.confirm("Enable RPM Fusion (non-free)?", false)? {
            self.enable_rpm_fusion(Fusion::NonFree)?;
        }

        Ok(())
    }

    fn enable_parallel_downloads(&self) -> Result<()> {
        let current = match fs::read_to_string(&self.dnf_conf) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("could not read {}: {}", self.dnf_conf.display(), e);
                String::new()
            }
        };

        if current.contains(PARALLEL_DOWNLOADS) {
            tracing::info!("{} already set in {}", PARALLEL_DOWNLOADS, self.dnf_conf.display());
            return Ok(());
        }

        let mut line = format!("{}=10\n", PARALLEL_DOWNLOADS);
        if !current.is_empty() && !current.ends_with('\n') {
            line.insert(0, '\n');
        }

        let command = CommandLine::new("sudo", ["tee", "-a"])
            .arg(self.dnf_conf.display().to_string())
            .quiet();
        let exit = self.runner.run_with_stdin(&command, line.as_bytes())?;
        self.check(&command, exit)
    }

    fn enable_rpm_fusion(&mut self, tier: Fusion) -> Result<()> {
        if self.inventory.repository.contains(tier.package()) {
            return Ok(());
        }

        let (release, family) = match self.env.repository {
            Repository::Fedora => ("%fedora", "fedora"),
            Repository::RedHat => {
                self.install("epel-release")?;
                ("%rhel", "el")
            }
            other => {
                tracing::warn!("RPM Fusion is not available for {:?}", other);
                return Ok(());
            }
        };

        let version = self
            .runner
            .output(&CommandLine::new("rpm", ["-E", release]))?
            .trim()
            .to_string();

        let url = format!(
            "https://mirrors.rpmfusion.org/{}/{}/{}-{}.noarch.rpm",
            tier.path(),
            family,
            tier.package(),
            version
        );

        self.run_checked(&self.manager.install_command(&[url.as_str()]))?;

        self.inventory.repository.insert(tier.package().to_string());
        Ok(())
    }
}
