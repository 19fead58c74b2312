//! Host distribution detection.
//!
//! `/etc/os-release` is matched by raw substring against a fixed, ordered
//! list of names. Derivatives must come before the distribution they
//! mention (Silverblue before Fedora, Mint before Ubuntu).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::cmd::Runner;
use crate::error::Error;

/// Distribution family used to key native package names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Repository {
    Arch,
    Debian,
    Fedora,
    RedHat,
    Ubuntu,
}

/// Native package manager family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManagerKind {
    Apt,
    Dnf,
    Pacman,
    RpmOsTree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesktopEnvironment {
    Gnome,
    Kde,
}

impl DesktopEnvironment {
    pub const ALL: [DesktopEnvironment; 2] = [DesktopEnvironment::Gnome, DesktopEnvironment::Kde];

    /// Binary whose presence means this desktop is installed
    pub fn shell_binary(&self) -> &'static str {
        match self {
            DesktopEnvironment::Gnome => "gnome-shell",
            DesktopEnvironment::Kde => "plasmashell",
        }
    }
}

/// Supported distributions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistroName {
    Arch,
    Alma,
    CentOS,
    Debian,
    Silverblue,
    Fedora,
    Mint,
    Ubuntu,
}

/// Probe order. First substring found in os-release wins.
const PROBE_ORDER: &[(&str, DistroName)] = &[
    ("Arch", DistroName::Arch),
    ("Alma", DistroName::Alma),
    ("CentOS", DistroName::CentOS),
    ("Debian", DistroName::Debian),
    ("Silverblue", DistroName::Silverblue),
    ("Fedora", DistroName::Fedora),
    ("Mint", DistroName::Mint),
    ("Ubuntu", DistroName::Ubuntu),
];

impl DistroName {
    /// Match os-release text against the probe list
    pub fn identify(os_release: &str) -> Option<Self> {
        PROBE_ORDER
            .iter()
            .find(|(needle, _)| os_release.contains(needle))
            .map(|(_, name)| *name)
    }

    pub fn repository(&self) -> Repository {
        match self {
            DistroName::Arch => Repository::Arch,
            DistroName::Alma | DistroName::CentOS => Repository::RedHat,
            DistroName::Debian => Repository::Debian,
            DistroName::Silverblue | DistroName::Fedora => Repository::Fedora,
            DistroName::Mint | DistroName::Ubuntu => Repository::Ubuntu,
        }
    }

    pub fn package_manager(&self) -> PackageManagerKind {
        match self {
            DistroName::Arch => PackageManagerKind::Pacman,
            DistroName::Alma | DistroName::CentOS | DistroName::Fedora => PackageManagerKind::Dnf,
            DistroName::Silverblue => PackageManagerKind::RpmOsTree,
            DistroName::Debian | DistroName::Mint | DistroName::Ubuntu => PackageManagerKind::Apt,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DistroName::Arch => "Arch Linux",
            DistroName::Alma => "AlmaLinux",
            DistroName::CentOS => "CentOS",
            DistroName::Debian => "Debian",
            DistroName::Silverblue => "Fedora Silverblue",
            DistroName::Fedora => "Fedora",
            DistroName::Mint => "Linux Mint",
            DistroName::Ubuntu => "Ubuntu",
        }
    }
}

impl fmt::Display for DistroName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything learned about the host at startup. Never re-detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub name: DistroName,
    pub repository: Repository,
    pub package_manager: PackageManagerKind,
    pub desktops: BTreeSet<DesktopEnvironment>,
}

impl Environment {
    pub fn new(name: DistroName) -> Self {
        Self {
            name,
            repository: name.repository(),
            package_manager: name.package_manager(),
            desktops: BTreeSet::new(),
        }
    }

    pub fn with_desktops(mut self, desktops: BTreeSet<DesktopEnvironment>) -> Self {
        self.desktops = desktops;
        self
    }

    /// Identify the distribution from os-release text
    pub fn from_os_release(content: &str, path: &Path) -> Result<Self> {
        let name = DistroName::identify(content).ok_or_else(|| Error::UnknownDistribution {
            path: path.to_path_buf(),
        })?;
        Ok(Self::new(name))
    }

    /// Read the identification file and probe installed desktops
    pub fn detect(os_release: &Path, runner: &dyn Runner) -> Result<Self> {
        let content = fs::read_to_string(os_release)
            .with_context(|| format!("Failed to read {}", os_release.display()))?;

        let env = Self::from_os_release(&content, os_release)?
            .with_desktops(detect_desktops(runner));

        tracing::info!(
            "detected {} (repository {:?}, package manager {:?}, desktops {:?})",
            env.name,
            env.repository,
            env.package_manager,
            env.desktops
        );

        Ok(env)
    }
}

pub fn detect_desktops(runner: &dyn Runner) -> BTreeSet<DesktopEnvironment> {
    DesktopEnvironment::ALL
        .into_iter()
        .filter(|de| runner.exists(de.shell_binary()))
        .collect()
}
