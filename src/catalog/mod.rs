//! Package catalog.
//!
//! Entries are plain data: per-channel identifiers plus the names of the
//! hooks to run around an install. The built-in catalog is embedded YAML.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::channel::{Flatpak, OtherPackage, Snap};
use crate::config::Settings;
use crate::distro::{DesktopEnvironment, Repository};
use crate::hooks::HookId;

const BUILTIN: &str = include_str!("packages.yaml");

/// One installable thing, as offered in the menus
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Package {
    /// Display name, unique within the catalog
    pub name: String,
    /// Only meaningful on this desktop (display hint)
    #[serde(default)]
    pub desktop: Option<DesktopEnvironment>,
    /// Native package names per repository. A missing key means unavailable.
    #[serde(default)]
    pub repositories: BTreeMap<Repository, Vec<String>>,
    #[serde(default)]
    pub flatpak: Option<Flatpak>,
    #[serde(default)]
    pub snap: Option<Snap>,
    #[serde(default)]
    pub other: Option<OtherPackage>,
    #[serde(default)]
    pub pre_install: Option<HookId>,
    #[serde(default)]
    pub post_install: Option<HookId>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desktop: None,
            repositories: BTreeMap::new(),
            flatpak: None,
            snap: None,
            other: None,
            pre_install: None,
            post_install: None,
        }
    }

    pub fn repository(mut self, repository: Repository, names: &[&str]) -> Self {
        self.repositories
            .insert(repository, names.iter().map(|n| n.to_string()).collect());
        self
    }

    pub fn flatpak(mut self, flatpak: Flatpak) -> Self {
        self.flatpak = Some(flatpak);
        self
    }

    pub fn snap(mut self, snap: Snap) -> Self {
        self.snap = Some(snap);
        self
    }

    pub fn other(mut self, other: OtherPackage) -> Self {
        self.other = Some(other);
        self
    }

    pub fn desktop(mut self, desktop: DesktopEnvironment) -> Self {
        self.desktop = Some(desktop);
        self
    }

    pub fn hooks(mut self, pre: Option<HookId>, post: Option<HookId>) -> Self {
        self.pre_install = pre;
        self.post_install = post;
        self
    }

    /// Native names on `repository`; `None` when there are none
    pub fn native_ids(&self, repository: Repository) -> Option<&[String]> {
        self.repositories
            .get(&repository)
            .filter(|names| !names.is_empty())
            .map(Vec::as_slice)
    }

    /// Offered through at least one channel on some repository
    pub fn has_any_channel(&self) -> bool {
        self.repositories.values().any(|names| !names.is_empty())
            || self.flatpak.is_some()
            || self.snap.is_some()
            || self.other.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Category {
    #[serde(rename = "category")]
    pub name: String,
    pub packages: Vec<Package>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

impl Catalog {
    pub fn parse(content: &str) -> Result<Self> {
        let categories: Vec<Category> =
            serde_yaml::from_str(content).context("Failed to parse YAML catalog")?;
        Ok(Self { categories })
    }

    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN).context("Built-in catalog is invalid")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid catalog {}", path.display()))
    }

    /// Built-in catalog plus `extra_catalog`, if configured
    pub fn load(settings: &Settings) -> Result<Self> {
        let mut catalog = Self::builtin()?;

        if let Some(path) = &settings.extra_catalog {
            let extra = Self::from_file(path)?;
            tracing::info!(
                "loaded {} extra categories from {}",
                extra.categories.len(),
                path.display()
            );
            catalog.merge(extra);
        }

        Ok(catalog)
    }

    /// Packages for an existing category are appended to it
    pub fn merge(&mut self, other: Catalog) {
        for category in other.categories {
            match self.categories.iter_mut().find(|c| c.name == category.name) {
                Some(existing) => existing.packages.extend(category.packages),
                None => self.categories.push(category),
            }
        }
    }

    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.categories.iter().flat_map(|c| c.packages.iter())
    }

    pub fn find(&self, name: &str) -> Option<&Package> {
        self.packages().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::FlatpakRemote;

    #[test]
    fn parses_entry_with_every_channel() {
        let catalog = Catalog::parse(
            r#"
- category: Editors
  packages:
    - name: "Example"
      desktop: kde
      repositories:
        fedora: [example, example-data]
        arch: []
      flatpak: { id: org.example.App, remotes: [fedora, flathub] }
      snap: { name: example, classic: true }
      other: rust
      pre_install: vim-cleanup
      post_install: vim-config
"#,
        )
        .unwrap();

        let package = catalog.find("Example").unwrap();
        assert_eq!(package.desktop, Some(DesktopEnvironment::Kde));
        assert_eq!(
            package.native_ids(Repository::Fedora).unwrap(),
            ["example".to_string(), "example-data".to_string()]
        );
        assert!(package.native_ids(Repository::Arch).is_none());
        assert!(package.native_ids(Repository::Debian).is_none());
        assert_eq!(
            package.flatpak.as_ref().unwrap().remotes,
            vec![FlatpakRemote::Fedora, FlatpakRemote::FlatHub]
        );
        let snap = package.snap.as_ref().unwrap();
        assert!(snap.classic && !snap.official && snap.channel.is_none());
        assert_eq!(package.other, Some(OtherPackage::Rust));
        assert_eq!(package.pre_install, Some(HookId::VimCleanup));
        assert_eq!(package.post_install, Some(HookId::VimConfig));
    }

    #[test]
    fn unknown_fields_rejected() {
        let result = Catalog::parse(
            r#"
- category: Server
  packages:
    - name: "Typo"
      repositorys: { arch: [typo] }
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_hook_rejected() {
        let result = Catalog::parse(
            r#"
- category: Server
  packages:
    - name: "Hooked"
      snap: { name: hooked }
      post_install: format-disk
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn builtin_categories_in_menu_order() {
        let catalog = Catalog::builtin().unwrap();
        let names: Vec<&str> = catalog.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Server",
                "Desktop",
                "Applications",
                "Browsers",
                "Communication",
                "Games",
                "MultiMedia",
                "Editors",
                "Software",
                "Utilities"
            ]
        );
    }

    #[test]
    fn builtin_go_entry() {
        let catalog = Catalog::builtin().unwrap();
        let go = catalog.find("Go Language").unwrap();
        assert_eq!(
            go.native_ids(Repository::Fedora).unwrap(),
            ["golang".to_string(), "golang-x-tools-gopls".to_string()]
        );
        assert_eq!(go.snap.as_ref().map(|s| s.name.as_str()), Some("go"));
        assert_eq!(go.pre_install, Some(HookId::GoWorkspaceCleanup));
        assert_eq!(go.post_install, Some(HookId::GoWorkspaceSetup));
    }

    #[test]
    fn merge_appends_to_matching_category() {
        let mut catalog = Catalog::parse(
            "- category: Server\n  packages:\n    - name: a\n      snap: { name: a }\n",
        )
        .unwrap();
        let extra = Catalog::parse(
            "- category: Server\n  packages:\n    - name: b\n      snap: { name: b }\n\
             - category: Mine\n  packages:\n    - name: c\n      snap: { name: c }\n",
        )
        .unwrap();

        catalog.merge(extra);

        assert_eq!(catalog.categories.len(), 2);
        assert_eq!(catalog.categories[0].packages.len(), 2);
        assert_eq!(catalog.categories[1].name, "Mine");
    }

    #[test]
    fn load_reads_extra_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.yaml");
        fs::write(
            &path,
            "- category: Personal\n  packages:\n    - name: ripgrep\n      repositories: { arch: [ripgrep] }\n",
        )
        .unwrap();
        let settings = Settings {
            extra_catalog: Some(path),
            ..Settings::default()
        };

        let catalog = Catalog::load(&settings).unwrap();

        assert_eq!(catalog.categories.last().unwrap().name, "Personal");
        assert!(catalog.find("ripgrep").is_some());
    }
}
