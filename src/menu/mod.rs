//! Interactive menus over a [`Distribution`].

pub mod category;
pub mod display;
pub mod flatpak_remote;
pub mod install_method;
pub mod package;

use anyhow::{anyhow, Result};

use crate::catalog::Catalog;
use crate::distribution::Distribution;
use crate::prompt::Prompter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAction {
    RepositorySetup,
    Update,
    Install,
    AutoRemove,
    Exit,
}

impl MainAction {
    pub const ALL: [MainAction; 5] = [
        MainAction::RepositorySetup,
        MainAction::Update,
        MainAction::Install,
        MainAction::AutoRemove,
        MainAction::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MainAction::RepositorySetup => "Repository Setup",
            MainAction::Update => "Update Packages",
            MainAction::Install => "Install Packages",
            MainAction::AutoRemove => "Auto Remove Packages",
            MainAction::Exit => "Exit",
        }
    }
}

/// Main menu loop; returns when Exit is chosen
pub fn run(dist: &mut Distribution, catalog: &Catalog, prompter: &mut dyn Prompter) -> Result<()> {
    let labels: Vec<String> = MainAction::ALL
        .iter()
        .map(|action| action.label().to_string())
        .collect();

    loop {
        match select(prompter, "Main Menu", &MainAction::ALL, &labels)? {
            MainAction::RepositorySetup => dist.repository_setup(prompter)?,
            MainAction::Update => dist.update()?,
            MainAction::Install => category::choose(dist, catalog, prompter)?,
            MainAction::AutoRemove => dist.autoremove()?,
            MainAction::Exit => return Ok(()),
        }
    }
}

/// Ask with `labels` and map the answer back onto `items`
fn select<T: Copy>(
    prompter: &mut dyn Prompter,
    title: &str,
    items: &[T],
    labels: &[String],
) -> Result<T> {
    let idx = prompter.select(title, labels)?;
    items
        .get(idx)
        .copied()
        .ok_or_else(|| anyhow!("Selection {} out of range in {}", idx, title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::fake::FakeRunner;
    use crate::distribution::testing::{fixture, fixture_with, settings};
    use crate::distribution::InstallMethod;
    use crate::distro::DistroName;
    use crate::prompt::scripted::Scripted;

    #[test]
    fn exit_immediately() {
        let (mut dist, runner) = fixture(DistroName::Debian);
        let mut prompter = Scripted::new().pick("Exit");

        run(&mut dist, &Catalog::default(), &mut prompter).unwrap();

        assert!(runner.calls().is_empty());
        assert_eq!(
            prompter.shown[0].1,
            vec![
                "Repository Setup",
                "Update Packages",
                "Install Packages",
                "Auto Remove Packages",
                "Exit"
            ]
        );
    }

    #[test]
    fn update_then_autoremove() {
        let (mut dist, runner) = fixture(DistroName::Debian);
        let mut prompter = Scripted::new()
            .pick("Update Packages")
            .pick("Auto Remove Packages")
            .pick("Exit");

        run(&mut dist, &Catalog::default(), &mut prompter).unwrap();

        assert_eq!(
            runner.calls(),
            vec![
                "sudo apt update",
                "sudo apt full-upgrade -Vy",
                "sudo apt autoremove -y"
            ]
        );
    }

    #[test]
    fn install_git_from_builtin_catalog() {
        let catalog = Catalog::builtin().unwrap();
        let (mut dist, runner) = fixture_with(DistroName::Debian, FakeRunner::new(), &settings());
        let mut prompter = Scripted::new()
            .pick("Install Packages")
            .pick("Server")
            .pick("git - Version Control")
            .pick("Repository")
            .pick("Back")
            .pick("Back")
            .pick("Back")
            .pick("Exit");

        run(&mut dist, &catalog, &mut prompter).unwrap();

        assert!(prompter.exhausted());
        assert_eq!(runner.calls(), vec!["sudo apt install -y git"]);
        let git = catalog.find("git - Version Control").unwrap();
        assert_eq!(dist.install_method(git), InstallMethod::Repository);
    }

    #[test]
    fn end_of_input_propagates() {
        let (mut dist, _) = fixture(DistroName::Debian);
        assert!(run(&mut dist, &Catalog::default(), &mut Scripted::new()).is_err());
    }
}
