//! The distribution aggregate.
//!
//! Owns everything learned about the host at startup: the environment
//! probe, the native package manager and the four installed-sets. The
//! installed-sets are the source of truth for the menus and are updated in
//! place after every install or uninstall instead of being re-queried.

mod channels;
mod maintenance;
mod resolve;

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::channel::{flatpak, other, snap, OtherPackage};
use crate::cmd::{CommandLine, Exit, Runner};
use crate::config::{Settings, Strictness};
use crate::distro::{DesktopEnvironment, Environment, PackageManagerKind, Repository};
use crate::error::Error;
use crate::pkgmgr::PackageManager;

/// How a package is (or should be) installed.
///
/// `Uninstall` and `None` are menu actions, never a resolved state other
/// than `None` meaning "not installed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstallMethod {
    Repository,
    Flatpak,
    Snap,
    Other,
    Uninstall,
    None,
}

impl InstallMethod {
    /// Backed by an installation channel
    pub fn is_channel(&self) -> bool {
        matches!(
            self,
            InstallMethod::Repository
                | InstallMethod::Flatpak
                | InstallMethod::Snap
                | InstallMethod::Other
        )
    }
}

/// Installed identifiers per channel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    pub repository: BTreeSet<String>,
    pub flatpak: BTreeSet<String>,
    pub snap: BTreeSet<String>,
    pub other: BTreeSet<OtherPackage>,
}

impl Inventory {
    /// Query each channel in turn
    pub fn probe(manager: &dyn PackageManager, runner: &dyn Runner) -> Result<Self> {
        Ok(Self {
            repository: manager
                .list_installed(runner)
                .with_context(|| format!("Failed to list {} packages", manager.name()))?,
            flatpak: flatpak::installed(runner)?,
            snap: snap::installed(runner)?,
            other: other::installed(runner),
        })
    }

    /// Query all channels at once on the blocking pool
    pub async fn probe_concurrent(kind: PackageManagerKind, runner: Arc<dyn Runner>) -> Result<Self> {
        let repository_runner = runner.clone();
        let flatpak_runner = runner.clone();
        let snap_runner = runner.clone();
        let other_runner = runner;

        let (repository, flatpak, snap, other) = tokio::try_join!(
            blocking(move || {
                let manager = kind.create();
                manager
                    .list_installed(repository_runner.as_ref())
                    .with_context(|| format!("Failed to list {} packages", manager.name()))
            }),
            blocking(move || flatpak::installed(flatpak_runner.as_ref())),
            blocking(move || snap::installed(snap_runner.as_ref())),
            blocking(move || Ok(other::installed(other_runner.as_ref()))),
        )?;

        Ok(Self {
            repository,
            flatpak,
            snap,
            other,
        })
    }
}

async fn blocking<T, F>(task: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .context("Inventory task panicked")?
}

pub struct Distribution {
    env: Environment,
    manager: Box<dyn PackageManager>,
    runner: Arc<dyn Runner>,
    inventory: Inventory,
    strictness: Strictness,
    home: Option<PathBuf>,
    dnf_conf: PathBuf,
}

impl fmt::Debug for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Distribution")
            .field("env", &self.env)
            .field("manager", &self.manager.name())
            .field("inventory", &self.inventory)
            .field("strictness", &self.strictness)
            .finish_non_exhaustive()
    }
}

impl Distribution {
    pub fn new(
        env: Environment,
        runner: Arc<dyn Runner>,
        inventory: Inventory,
        settings: &Settings,
    ) -> Self {
        Self {
            manager: env.package_manager.create(),
            env,
            runner,
            inventory,
            strictness: settings.strictness,
            home: settings.home.clone(),
            dnf_conf: settings.dnf_conf.clone(),
        }
    }

    /// Probe the host and populate every installed-set
    pub async fn detect(settings: &Settings, runner: Arc<dyn Runner>) -> Result<Self> {
        let env = Environment::detect(&settings.os_release, runner.as_ref())?;

        let inventory = if settings.concurrent_probe {
            Inventory::probe_concurrent(env.package_manager, runner.clone()).await?
        } else {
            Inventory::probe(env.package_manager.create().as_ref(), runner.as_ref())?
        };

        tracing::info!(
            "inventory: {} native, {} flatpak, {} snap, {} other",
            inventory.repository.len(),
            inventory.flatpak.len(),
            inventory.snap.len(),
            inventory.other.len()
        );

        Ok(Self::new(env, runner, inventory, settings))
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn repository(&self) -> Repository {
        self.env.repository
    }

    pub fn package_manager(&self) -> PackageManagerKind {
        self.env.package_manager
    }

    pub fn desktops(&self) -> &BTreeSet<DesktopEnvironment> {
        &self.env.desktops
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn runner(&self) -> &dyn Runner {
        self.runner.as_ref()
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// Home directory for per-user configuration written by hooks
    pub fn home(&self) -> Result<&Path> {
        self.home
            .as_deref()
            .ok_or_else(|| Error::MissingEnv("HOME").into())
    }

    /// Run a command and pass its exit through [`Distribution::check`]
    pub(crate) fn run_checked(&self, command: &CommandLine) -> Result<()> {
        let exit = self.runner.run(command)?;
        self.check(command, exit)
    }

    /// Decide whether a finished command may be recorded as done
    pub(crate) fn check(&self, command: impl fmt::Display, exit: Exit) -> Result<()> {
        if exit.success() {
            return Ok(());
        }

        match self.strictness {
            Strictness::Optimistic => {
                tracing::warn!(
                    "`{}` exited with code {:?}, recording it as done anyway",
                    command,
                    exit.code
                );
                Ok(())
            }
            Strictness::Strict => Err(Error::CommandFailed {
                command: command.to_string(),
                code: exit.code,
            }
            .into()),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::cmd::fake::FakeRunner;
    use crate::distro::DistroName;

    pub fn settings() -> Settings {
        Settings {
            home: Some(PathBuf::from("/home/tester")),
            ..Settings::default()
        }
    }

    /// A distribution over a recording runner with nothing installed
    pub fn fixture(name: DistroName) -> (Distribution, Arc<FakeRunner>) {
        fixture_with(name, FakeRunner::new(), &settings())
    }

    pub fn fixture_with(
        name: DistroName,
        runner: FakeRunner,
        settings: &Settings,
    ) -> (Distribution, Arc<FakeRunner>) {
        let runner = Arc::new(runner);
        let dist = Distribution::new(
            Environment::new(name),
            runner.clone(),
            Inventory::default(),
            settings,
        );
        (dist, runner)
    }

    impl Distribution {
        pub fn inventory_mut(&mut self) -> &mut Inventory {
            &mut self.inventory
        }
    }
}
