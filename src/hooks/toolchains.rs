use anyhow::Result;
use std::env;
use std::fs;

use super::{append_once, exec, remove_quietly};
use crate::channel::snap;
use crate::cmd::CommandLine;
use crate::distribution::{Distribution, InstallMethod};
use crate::distro::Repository;

const MICROSOFT_PROD_DEB: &str =
    "https://packages.microsoft.com/config/debian/12/packages-microsoft-prod.deb";

/// Debian needs Microsoft's package feed before dotnet is installable
pub(super) fn dotnet_microsoft_repo(dist: &mut Distribution, method: InstallMethod) -> Result<()> {
    if method != InstallMethod::Repository || dist.repository() != Repository::Debian {
        return Ok(());
    }

    dist.install("wget")?;

    let deb = env::temp_dir().join("packages-microsoft-prod.deb");
    let deb_arg = deb.display().to_string();
    exec(
        dist,
        CommandLine::new("wget", [MICROSOFT_PROD_DEB, "-O", &deb_arg]),
    )?;
    exec(dist, CommandLine::new("sudo", ["dpkg", "-i", &deb_arg]))?;
    if deb.exists() {
        fs::remove_file(&deb)?;
    }

    dist.refresh()
}

pub(super) fn go_workspace_cleanup(dist: &mut Distribution, method: InstallMethod) -> Result<()> {
    if method != InstallMethod::Uninstall {
        return Ok(());
    }
    let gopath = dist.home()?.join(".go");
    remove_quietly(dist, &[gopath])
}

pub(super) fn go_workspace_setup(dist: &mut Distribution, method: InstallMethod) -> Result<()> {
    if method == InstallMethod::Uninstall {
        return Ok(());
    }
    let home = dist.home()?.to_path_buf();

    exec(
        dist,
        CommandLine::new("go", ["env", "-w"]).arg(format!("GOPATH={}", home.join(".go").display())),
    )?;

    // Snap and EL builds ship without gopls
    if method == InstallMethod::Snap || dist.repository() == Repository::RedHat {
        append_once(
            &home.join(".bashrc"),
            "export GOPATH",
            "export GOPATH=$HOME/.go\nexport PATH=$PATH:$GOPATH/bin\n",
        )?;
        exec(
            dist,
            CommandLine::new("go", ["install", "golang.org/x/tools/gopls@latest"]),
        )?;
    }

    Ok(())
}

pub(super) fn nodejs_module_stream(dist: &mut Distribution, method: InstallMethod) -> Result<()> {
    if method == InstallMethod::Repository && dist.repository() == Repository::RedHat {
        exec(
            dist,
            CommandLine::new("sudo", ["dnf", "module", "enable", "nodejs:20", "-y"]),
        )?;
    }
    Ok(())
}

/// A stray rustup binary shadows the distribution's cargo
pub(super) fn rustup_cleanup(dist: &mut Distribution, method: InstallMethod) -> Result<()> {
    if method == InstallMethod::Other {
        return dist.install("curl");
    }
    let rustup = dist.home()?.join(".cargo/bin/rustup");
    remove_quietly(dist, &[rustup])
}

pub(super) fn rustup_components(dist: &mut Distribution, method: InstallMethod) -> Result<()> {
    if method != InstallMethod::Other {
        return Ok(());
    }
    let rustup = dist.home()?.join(".cargo/bin/rustup");
    exec(
        dist,
        CommandLine::new(rustup.display().to_string(), ["component", "add", "rust-analyzer"]),
    )
}

pub(super) fn snapd_setup(dist: &mut Distribution, method: InstallMethod) -> Result<()> {
    if method == InstallMethod::Uninstall {
        return Ok(());
    }
    let exit = snap::setup(dist.runner(), dist.package_manager())?;
    dist.check("snapd setup", exit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::fake::FakeRunner;
    use crate::config::Settings;
    use crate::distribution::testing::{fixture, fixture_with};
    use crate::distro::DistroName;
    use crate::hooks::{run, HookId};

    fn home_settings(home: &std::path::Path) -> Settings {
        Settings {
            home: Some(home.to_path_buf()),
            ..Settings::default()
        }
    }

    #[test]
    fn dotnet_repo_only_for_debian_repository_installs() {
        let (mut dist, runner) = fixture(DistroName::Ubuntu);
        run(HookId::DotnetMicrosoftRepo, &mut dist, InstallMethod::Repository).unwrap();
        assert!(runner.calls().is_empty());

        let (mut dist, runner) = fixture(DistroName::Debian);
        run(HookId::DotnetMicrosoftRepo, &mut dist, InstallMethod::Snap).unwrap();
        assert!(runner.calls().is_empty());

        run(HookId::DotnetMicrosoftRepo, &mut dist, InstallMethod::Repository).unwrap();
        let calls = runner.calls();
        assert_eq!(calls[0], "sudo apt install -y wget");
        assert!(calls[1].starts_with("wget https://packages.microsoft.com/config/debian/12/"));
        assert!(calls[2].starts_with("sudo dpkg -i "));
        assert_eq!(calls[3], "sudo apt update");
        assert_eq!(calls.len(), 4);
    }

    #[test]
    fn go_setup_for_snap_extends_bashrc() {
        let home = tempfile::tempdir().unwrap();
        let (mut dist, runner) =
            fixture_with(DistroName::Ubuntu, FakeRunner::new(), &home_settings(home.path()));

        run(HookId::GoWorkspaceSetup, &mut dist, InstallMethod::Snap).unwrap();
        run(HookId::GoWorkspaceSetup, &mut dist, InstallMethod::Snap).unwrap();

        let bashrc = fs::read_to_string(home.path().join(".bashrc")).unwrap();
        assert_eq!(bashrc.matches("export GOPATH").count(), 1);
        assert_eq!(
            runner.calls()[0],
            format!("go env -w GOPATH={}", home.path().join(".go").display())
        );
        assert_eq!(runner.count("go install golang.org/x/tools/gopls@latest"), 2);
    }

    #[test]
    fn go_setup_from_repository_skips_gopls() {
        let home = tempfile::tempdir().unwrap();
        let (mut dist, runner) =
            fixture_with(DistroName::Fedora, FakeRunner::new(), &home_settings(home.path()));

        run(HookId::GoWorkspaceSetup, &mut dist, InstallMethod::Repository).unwrap();

        assert_eq!(runner.calls().len(), 1);
        assert!(!home.path().join(".bashrc").exists());
    }

    #[test]
    fn go_cleanup_only_on_uninstall() {
        let (mut dist, runner) = fixture(DistroName::Fedora);
        run(HookId::GoWorkspaceCleanup, &mut dist, InstallMethod::Snap).unwrap();
        assert!(runner.calls().is_empty());

        run(HookId::GoWorkspaceCleanup, &mut dist, InstallMethod::Uninstall).unwrap();
        assert_eq!(runner.calls(), vec!["sudo rm -r /home/tester/.go"]);
    }

    #[test]
    fn nodejs_stream_on_redhat() {
        let (mut dist, runner) = fixture(DistroName::CentOS);
        run(HookId::NodejsModuleStream, &mut dist, InstallMethod::Repository).unwrap();
        assert_eq!(runner.calls(), vec!["sudo dnf module enable nodejs:20 -y"]);
    }

    #[test]
    fn rustup_hooks() {
        let (mut dist, runner) = fixture(DistroName::Debian);

        run(HookId::RustupCleanup, &mut dist, InstallMethod::Repository).unwrap();
        assert_eq!(runner.calls(), vec!["sudo rm -r /home/tester/.cargo/bin/rustup"]);
        runner.clear();

        run(HookId::RustupCleanup, &mut dist, InstallMethod::Other).unwrap();
        run(HookId::RustupComponents, &mut dist, InstallMethod::Other).unwrap();
        assert_eq!(
            runner.calls(),
            vec![
                "sudo apt install -y curl",
                "/home/tester/.cargo/bin/rustup component add rust-analyzer"
            ]
        );
    }

    #[test]
    fn snapd_setup_runs_on_dnf() {
        let (mut dist, runner) = fixture(DistroName::Fedora);
        run(HookId::SnapdSetup, &mut dist, InstallMethod::Uninstall).unwrap();
        assert!(runner.calls().is_empty());

        run(HookId::SnapdSetup, &mut dist, InstallMethod::Repository).unwrap();
        assert_eq!(runner.count("sudo systemctl enable --now snapd.socket"), 1);
    }
}
