//! User settings, read once at startup.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the settings file location
pub const CONFIG_ENV: &str = "PKGHANDLER_CONFIG";

/// What to do when an install or uninstall command exits non-zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Record the new state anyway and log a warning
    #[default]
    Optimistic,
    /// Leave the installed-sets untouched and fail with `CommandFailed`
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub os_release: PathBuf,
    pub strictness: Strictness,
    pub concurrent_probe: bool,
    pub dnf_conf: PathBuf,
    pub home: Option<PathBuf>,
    /// YAML file with categories appended to the built-in catalog
    pub extra_catalog: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            os_release: PathBuf::from("/etc/os-release"),
            strictness: Strictness::default(),
            concurrent_probe: true,
            dnf_conf: PathBuf::from("/etc/dnf/dnf.conf"),
            home: env::var_os("HOME").map(PathBuf::from),
            extra_catalog: None,
        }
    }
}

impl Settings {
    /// `$PKGHANDLER_CONFIG`, else `<config dir>/pkghandler/config.toml`
    pub fn path() -> Option<PathBuf> {
        env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|dir| dir.join("pkghandler").join("config.toml")))
    }

    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// A missing file yields defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML settings")
    }
}
