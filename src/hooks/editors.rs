use anyhow::Result;
use std::env;
use std::fs;

use super::{append_once, exec, remove_quietly, write_config};
use crate::cmd::CommandLine;
use crate::distribution::{Distribution, InstallMethod};
use crate::distro::{PackageManagerKind, Repository};

const VIMRC: &str = include_str!("../templates/vimrc");
const NEOVIM_INIT: &str = include_str!("../templates/init.vim");
const ALE: &str = include_str!("../templates/ale.vim");
const VSCODE_SETTINGS: &str = include_str!("../templates/vscode-settings.json");
const VSCODE_YUM_REPO: &str = include_str!("../templates/vscode.repo");

const MICROSOFT_KEY: &str = "https://packages.microsoft.com/keys/microsoft.asc";
const MICROSOFT_KEYRING: &str = "/etc/apt/keyrings/packages.microsoft.gpg";
const VSCODE_APT_LIST: &str = "/etc/apt/sources.list.d/vscode.list";
const VSCODE_YUM_FILE: &str = "/etc/yum.repos.d/vscode.repo";
const VSCODE_EXTENSIONS: [&str; 2] = ["esbenp.prettier-vscode", "vscodevim.vim"];

/// Base config plus the plugin mappings the repository packages support
fn vim_config_text(base: &str, repository: Repository) -> String {
    let mut text = base.to_string();

    // EL ships vim without plugins
    if repository != Repository::RedHat {
        if matches!(repository, Repository::Arch | Repository::Fedora) {
            text.push_str("nnoremap <C-n> :NERDTreeToggle<CR>\n");
        }
        text.push_str(ALE);
    }

    text
}

pub(super) fn vim_cleanup(dist: &mut Distribution, method: InstallMethod) -> Result<()> {
    if method != InstallMethod::Uninstall {
        return Ok(());
    }
    let home = dist.home()?;
    let paths = [home.join(".vim"), home.join(".viminfo"), home.join(".vimrc")];
    remove_quietly(dist, &paths)
}

pub(super) fn vim_config(dist: &mut Distribution, method: InstallMethod) -> Result<()> {
    if method == InstallMethod::Uninstall {
        return Ok(());
    }
    let home = dist.home()?;

    append_once(
        &home.join(".bashrc"),
        "export EDITOR",
        "export EDITOR=\"/usr/bin/vim\"\n",
    )?;
    write_config(
        &home.join(".vimrc"),
        &vim_config_text(VIMRC, dist.repository()),
    )
}

pub(super) fn neovim_cleanup(dist: &mut Distribution, method: InstallMethod) -> Result<()> {
    if method != InstallMethod::Uninstall {
        return Ok(());
    }
    let config = dist.home()?.join(".config/nvim");
    remove_quietly(dist, &[config])
}

pub(super) fn neovim_config(dist: &mut Distribution, method: InstallMethod) -> Result<()> {
    if method == InstallMethod::Uninstall {
        return Ok(());
    }
    write_config(
        &dist.home()?.join(".config/nvim/init.vim"),
        &vim_config_text(NEOVIM_INIT, dist.repository()),
    )
}

pub(super) fn ideavim_config(dist: &mut Distribution, method: InstallMethod) -> Result<()> {
    if method == InstallMethod::Uninstall {
        return Ok(());
    }
    write_config(&dist.home()?.join(".ideavimrc"), "sethandler a:ide\n")
}

/// The copr repository must only be active while PyCharm comes from it
pub(super) fn pycharm_repository(dist: &mut Distribution, method: InstallMethod) -> Result<()> {
    if dist.repository() != Repository::Fedora {
        return Ok(());
    }
    let flag = if method == InstallMethod::Repository {
        "--set-enabled"
    } else {
        "--set-disabled"
    };
    exec(
        dist,
        CommandLine::new("sudo", ["dnf", "config-manager", flag, "phracek-PyCharm"]),
    )
}

pub(super) fn vscode_repository(dist: &mut Distribution, method: InstallMethod) -> Result<()> {
    let manager = dist.package_manager();

    if method != InstallMethod::Repository {
        let runner = dist.runner();
        match manager {
            PackageManagerKind::Apt => {
                runner.run(&CommandLine::new("sudo", ["rm", "-f", VSCODE_APT_LIST]).quiet())?;
            }
            PackageManagerKind::Dnf => {
                runner.run(
                    &CommandLine::new("sudo", ["dnf", "config-manager", "--set-disabled", "code"])
                        .quiet(),
                )?;
                runner.run(&CommandLine::new("sudo", ["rm", "-f", VSCODE_YUM_FILE]).quiet())?;
            }
            _ => {}
        }
    }

    if method == InstallMethod::Uninstall {
        let home = dist.home()?;
        let paths = [home.join(".vscode"), home.join(".config/Code")];
        remove_quietly(dist, &paths)?;
    }

    if method == InstallMethod::Repository {
        match manager {
            PackageManagerKind::Apt => add_apt_repository(dist)?,
            PackageManagerKind::Dnf => add_yum_repository(dist)?,
            _ => {}
        }
    }

    Ok(())
}

fn add_apt_repository(dist: &mut Distribution) -> Result<()> {
    dist.install("wget")?;
    dist.install("gpg")?;

    let key = env::temp_dir().join("packages.microsoft.gpg");
    let key_arg = key.display().to_string();

    let exit = dist.runner().pipe(
        &CommandLine::new("wget", ["-qO-", MICROSOFT_KEY]),
        &CommandLine::new("gpg", ["--dearmor", "--yes", "-o", &key_arg]),
    )?;
    dist.check("wget | gpg --dearmor", exit)?;
    exec(
        dist,
        CommandLine::new(
            "sudo",
            [
                "install", "-D", "-o", "root", "-g", "root", "-m", "644", &key_arg,
                MICROSOFT_KEYRING,
            ],
        ),
    )?;
    if key.exists() {
        fs::remove_file(&key)?;
    }

    let source = format!(
        "deb [arch=amd64,arm64,armhf signed-by={}] https://packages.microsoft.com/repos/code stable main\n",
        MICROSOFT_KEYRING
    );
    write_root_file(dist, VSCODE_APT_LIST, &source)?;

    dist.refresh()
}

fn add_yum_repository(dist: &mut Distribution) -> Result<()> {
    exec(
        dist,
        CommandLine::new("sudo", ["rpm", "--import", MICROSOFT_KEY]),
    )?;
    write_root_file(dist, VSCODE_YUM_FILE, VSCODE_YUM_REPO)
}

fn write_root_file(dist: &Distribution, path: &str, content: &str) -> Result<()> {
    let command = CommandLine::new("sudo", ["tee", path]).quiet();
    let exit = dist.runner().run_with_stdin(&command, content.as_bytes())?;
    dist.check(&command, exit)
}

pub(super) fn vscode_config(dist: &mut Distribution, method: InstallMethod) -> Result<()> {
    if method == InstallMethod::Uninstall {
        return Ok(());
    }

    for extension in VSCODE_EXTENSIONS {
        exec(
            dist,
            CommandLine::new("code", ["--install-extension", extension]),
        )?;
    }

    let settings = dist.home()?.join(".config/Code/User/settings.json");
    write_config(&settings, VSCODE_SETTINGS)
}
