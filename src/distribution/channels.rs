//! Install and uninstall through each channel.
//!
//! Every mutation is a no-op when the installed-set already says so. The
//! command runs first; the set changes only once `check` lets it through.

use anyhow::Result;

use super::{Distribution, InstallMethod};
use crate::catalog::Package;
use crate::channel::{flatpak, snap, Flatpak, FlatpakRemote, OtherPackage, Snap};
use crate::distro::Repository;

impl Distribution {
    /// Install one native package
    pub fn install(&mut self, id: &str) -> Result<()> {
        self.install_native(&[id])
    }

    /// Remove one native package
    pub fn uninstall(&mut self, id: &str) -> Result<()> {
        self.uninstall_native(&[id])
    }

    /// Install every native name the package has on this repository
    pub fn install_package(&mut self, package: &Package) -> Result<()> {
        let Some(ids) = package.native_ids(self.env.repository) else {
            return Ok(());
        };
        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
        self.install_native(&ids)
    }

    pub fn uninstall_package(&mut self, package: &Package) -> Result<()> {
        let Some(ids) = package.native_ids(self.env.repository) else {
            return Ok(());
        };
        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
        self.uninstall_native(&ids)
    }

    fn install_native(&mut self, ids: &[&str]) -> Result<()> {
        let missing: Vec<&str> = ids
            .iter()
            .copied()
            .filter(|id| !self.inventory.repository.contains(*id))
            .collect();
        if missing.is_empty() {
            tracing::debug!("{:?} already installed", ids);
            return Ok(());
        }

        let command = self.manager.install_command(&missing);
        let exit = self.runner.run(&command)?;
        self.check(&command, exit)?;

        self.inventory
            .repository
            .extend(missing.into_iter().map(str::to_string));
        Ok(())
    }

    fn uninstall_native(&mut self, ids: &[&str]) -> Result<()> {
        let present: Vec<&str> = ids
            .iter()
            .copied()
            .filter(|id| self.inventory.repository.contains(*id))
            .collect();
        if present.is_empty() {
            return Ok(());
        }

        let command = self.manager.remove_command(&present);
        let exit = self.runner.run(&command)?;
        self.check(&command, exit)?;

        for id in present {
            self.inventory.repository.remove(id);
        }
        Ok(())
    }

    /// Install from `remote`, registering remotes and the flatpak tool first.
    /// Remotes the app is not published on are refused.
    pub fn install_flatpak(&mut self, app: &Flatpak, remote: FlatpakRemote) -> Result<()> {
        if self.inventory.flatpak.contains(&app.id) {
            return Ok(());
        }
        if !app.remotes.contains(&remote) {
            tracing::warn!("{} is not published on the {} remote", app.id, remote);
            return Ok(());
        }

        self.install("flatpak")?;
        flatpak::setup(self.runner.as_ref(), self.env.package_manager)?;

        let command = app.install_command(remote);
        let exit = self.runner.run(&command)?;
        self.check(&command, exit)?;

        self.inventory.flatpak.insert(app.id.clone());
        Ok(())
    }

    pub fn uninstall_flatpak(&mut self, app: &Flatpak) -> Result<()> {
        if !self.inventory.flatpak.contains(&app.id) {
            return Ok(());
        }

        let command = app.uninstall_command();
        let exit = self.runner.run(&command)?;
        self.check(&command, exit)?;

        self.inventory.flatpak.remove(&app.id);
        Ok(())
    }

    pub fn install_snap(&mut self, package: &Snap) -> Result<()> {
        if self.inventory.snap.contains(&package.name) {
            return Ok(());
        }

        // snapd is AUR-only on Arch
        if self.env.repository != Repository::Arch {
            self.install("snapd")?;
        }
        let exit = snap::setup(self.runner.as_ref(), self.env.package_manager)?;
        self.check("snapd setup", exit)?;

        let command = package.install_command();
        let exit = self.runner.run(&command)?;
        self.check(&command, exit)?;

        self.inventory.snap.insert(package.name.clone());
        Ok(())
    }

    pub fn uninstall_snap(&mut self, package: &Snap) -> Result<()> {
        if !self.inventory.snap.contains(&package.name) {
            return Ok(());
        }

        let command = package.uninstall_command();
        let exit = self.runner.run(&command)?;
        self.check(&command, exit)?;

        self.inventory.snap.remove(&package.name);
        Ok(())
    }

    pub fn install_other(&mut self, package: OtherPackage) -> Result<()> {
        if self.inventory.other.contains(&package) {
            return Ok(());
        }

        let exit = package.install(self.runner.as_ref())?;
        self.check(format_args!("{} installer", package), exit)?;

        self.inventory.other.insert(package);
        Ok(())
    }

    pub fn uninstall_other(&mut self, package: OtherPackage) -> Result<()> {
        if !self.inventory.other.contains(&package) {
            return Ok(());
        }

        let exit = package.uninstall(self.runner.as_ref())?;
        self.check(format_args!("{} self uninstall", package), exit)?;

        self.inventory.other.remove(&package);
        Ok(())
    }

    /// Remove the package from one channel, if it has a descriptor there
    pub fn remove_via(&mut self, method: InstallMethod, package: &Package) -> Result<()> {
        match method {
            InstallMethod::Repository => self.uninstall_package(package),
            InstallMethod::Flatpak => match &package.flatpak {
                Some(app) => self.uninstall_flatpak(app),
                None => Ok(()),
            },
            InstallMethod::Snap => match &package.snap {
                Some(snap) => self.uninstall_snap(snap),
                None => Ok(()),
            },
            InstallMethod::Other => match package.other {
                Some(other) => self.uninstall_other(other),
                None => Ok(()),
            },
            InstallMethod::Uninstall | InstallMethod::None => Ok(()),
        }
    }
}
