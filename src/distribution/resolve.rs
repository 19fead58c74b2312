//! Which channel a package is on, and which it may move to.

use super::{Distribution, InstallMethod};
use crate::catalog::Package;

impl Distribution {
    /// Offered through at least one channel on this host
    pub fn is_package_available(&self, package: &Package) -> bool {
        package.native_ids(self.env.repository).is_some()
            || package.flatpak.is_some()
            || package.snap.is_some()
            || package.other.is_some()
    }

    /// First channel, in priority order, where the package is installed
    pub fn install_method(&self, package: &Package) -> InstallMethod {
        let inventory = &self.inventory;

        if package
            .native_ids(self.env.repository)
            .is_some_and(|ids| ids.iter().any(|id| inventory.repository.contains(id)))
        {
            return InstallMethod::Repository;
        }
        if package
            .flatpak
            .as_ref()
            .is_some_and(|app| inventory.flatpak.contains(&app.id))
        {
            return InstallMethod::Flatpak;
        }
        if package
            .snap
            .as_ref()
            .is_some_and(|snap| inventory.snap.contains(&snap.name))
        {
            return InstallMethod::Snap;
        }
        if package
            .other
            .is_some_and(|other| inventory.other.contains(&other))
        {
            return InstallMethod::Other;
        }

        InstallMethod::None
    }

    /// Menu options: supported channels, then `Uninstall`, then `None`
    pub fn install_method_options(&self, package: &Package) -> Vec<InstallMethod> {
        let mut options = Vec::with_capacity(6);

        if package.native_ids(self.env.repository).is_some() {
            options.push(InstallMethod::Repository);
        }
        if package.flatpak.is_some() {
            options.push(InstallMethod::Flatpak);
        }
        if package.snap.is_some() {
            options.push(InstallMethod::Snap);
        }
        if package.other.is_some() {
            options.push(InstallMethod::Other);
        }

        options.push(InstallMethod::Uninstall);
        options.push(InstallMethod::None);
        options
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::fixture;
    use super::*;
    use crate::channel::{Flatpak, FlatpakRemote, OtherPackage, Snap};
    use crate::distro::{DistroName, Repository};

    fn everywhere() -> Package {
        Package::new("Everywhere")
            .repository(Repository::Fedora, &["everywhere", "everywhere-data"])
            .flatpak(Flatpak::new("org.example.Everywhere", &[FlatpakRemote::FlatHub]))
            .snap(Snap::new("everywhere"))
            .other(OtherPackage::Rust)
    }

    #[test]
    fn fedora_git_scenario() {
        let (dist, _) = fixture(DistroName::Fedora);
        let git = Package::new("git").repository(Repository::Fedora, &["git"]);

        assert_eq!(dist.install_method(&git), InstallMethod::None);
        assert_eq!(
            dist.install_method_options(&git),
            vec![
                InstallMethod::Repository,
                InstallMethod::Uninstall,
                InstallMethod::None
            ]
        );
    }

    #[test]
    fn options_follow_descriptors() {
        let (dist, _) = fixture(DistroName::Fedora);
        assert_eq!(
            dist.install_method_options(&everywhere()),
            vec![
                InstallMethod::Repository,
                InstallMethod::Flatpak,
                InstallMethod::Snap,
                InstallMethod::Other,
                InstallMethod::Uninstall,
                InstallMethod::None
            ]
        );

        // no Debian mapping
        let (dist, _) = fixture(DistroName::Debian);
        let options = dist.install_method_options(&everywhere());
        assert_eq!(options[0], InstallMethod::Flatpak);
        assert_eq!(options.len(), 5);
    }

    #[test]
    fn repository_wins_over_other_channels() {
        let (mut dist, _) = fixture(DistroName::Fedora);
        let inventory = dist.inventory_mut();
        inventory.repository.insert("everywhere-data".into());
        inventory.flatpak.insert("org.example.Everywhere".into());
        inventory.snap.insert("everywhere".into());

        assert_eq!(dist.install_method(&everywhere()), InstallMethod::Repository);
    }

    #[test]
    fn priority_order_below_repository() {
        let (mut dist, _) = fixture(DistroName::Fedora);
        dist.inventory_mut().other.insert(OtherPackage::Rust);
        assert_eq!(dist.install_method(&everywhere()), InstallMethod::Other);

        dist.inventory_mut().snap.insert("everywhere".into());
        assert_eq!(dist.install_method(&everywhere()), InstallMethod::Snap);

        dist.inventory_mut().flatpak.insert("org.example.Everywhere".into());
        assert_eq!(dist.install_method(&everywhere()), InstallMethod::Flatpak);
    }

    #[test]
    fn flatpak_state_ignores_remote() {
        let (mut dist, _) = fixture(DistroName::Fedora);
        let maps = Package::new("Maps").flatpak(Flatpak::new(
            "org.gnome.Maps",
            &[FlatpakRemote::Fedora, FlatpakRemote::FlatHub],
        ));
        dist.inventory_mut().flatpak.insert("org.gnome.Maps".into());

        assert_eq!(dist.install_method(&maps), InstallMethod::Flatpak);
    }

    #[test]
    fn availability() {
        let (dist, _) = fixture(DistroName::Ubuntu);
        let fedora_only = Package::new("Fedora only").repository(Repository::Fedora, &["x"]);
        let empty_list = Package::new("Empty").repository(Repository::Ubuntu, &[]);

        assert!(!dist.is_package_available(&fedora_only));
        assert!(!dist.is_package_available(&empty_list));
        assert!(dist.is_package_available(&everywhere()));
        assert!(dist.is_package_available(&Package::new("Snap only").snap(Snap::new("s"))));
    }
}
