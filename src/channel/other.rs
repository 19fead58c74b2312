use anyhow::Result;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::cmd::{CommandLine, Exit, Runner};

/// Third-party installers with their own install/update/uninstall logic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtherPackage {
    /// rustup toolchain manager
    Rust,
}

impl OtherPackage {
    pub const ALL: [OtherPackage; 1] = [OtherPackage::Rust];

    /// Binary whose presence means the installer has been run
    pub fn probe_binary(&self) -> &'static str {
        match self {
            OtherPackage::Rust => "rustup",
        }
    }

    pub fn is_present(&self, runner: &dyn Runner) -> bool {
        runner.exists(self.probe_binary())
    }

    pub fn install(&self, runner: &dyn Runner) -> Result<Exit> {
        match self {
            OtherPackage::Rust => runner.pipe(
                &CommandLine::new(
                    "curl",
                    ["--proto", "=https", "--tlsv1.2", "-sSf", "https://sh.rustup.rs"],
                ),
                &CommandLine::new("sh", ["-s", "--", "-y"]),
            ),
        }
    }

    pub fn uninstall(&self, runner: &dyn Runner) -> Result<Exit> {
        match self {
            OtherPackage::Rust => {
                if !self.is_present(runner) {
                    return Ok(Exit::SUCCESS);
                }
                runner.run(&CommandLine::new("rustup", ["self", "uninstall", "-y"]))
            }
        }
    }

    /// Self-update, in order
    pub fn update_commands(&self) -> Vec<CommandLine> {
        match self {
            OtherPackage::Rust => vec![
                CommandLine::new("rustup", ["self", "update"]),
                CommandLine::new("rustup", ["update", "stable"]),
            ],
        }
    }
}

impl fmt::Display for OtherPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OtherPackage::Rust => f.write_str("rustup"),
        }
    }
}

pub fn installed(runner: &dyn Runner) -> BTreeSet<OtherPackage> {
    OtherPackage::ALL
        .into_iter()
        .filter(|package| package.is_present(runner))
        .collect()
}
