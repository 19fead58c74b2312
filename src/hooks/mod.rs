//! Named pre/post install hooks.
//!
//! Catalog entries refer to hooks by [`HookId`]; [`run`] is the only way to
//! execute one. Every hook receives the method being switched to and decides
//! for itself whether it has anything to do.

mod editors;
mod toolchains;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cmd::CommandLine;
use crate::distribution::{Distribution, InstallMethod};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookId {
    DotnetMicrosoftRepo,
    GoWorkspaceCleanup,
    GoWorkspaceSetup,
    NodejsModuleStream,
    RustupCleanup,
    RustupComponents,
    SnapdSetup,
    VimCleanup,
    VimConfig,
    NeovimCleanup,
    NeovimConfig,
    IdeavimConfig,
    PycharmRepository,
    VscodeRepository,
    VscodeConfig,
}

pub fn run(id: HookId, dist: &mut Distribution, method: InstallMethod) -> Result<()> {
    tracing::debug!("running hook {:?} for {:?}", id, method);

    let result = match id {
        HookId::DotnetMicrosoftRepo => toolchains::dotnet_microsoft_repo(dist, method),
        HookId::GoWorkspaceCleanup => toolchains::go_workspace_cleanup(dist, method),
        HookId::GoWorkspaceSetup => toolchains::go_workspace_setup(dist, method),
        HookId::NodejsModuleStream => toolchains::nodejs_module_stream(dist, method),
        HookId::RustupCleanup => toolchains::rustup_cleanup(dist, method),
        HookId::RustupComponents => toolchains::rustup_components(dist, method),
        HookId::SnapdSetup => toolchains::snapd_setup(dist, method),
        HookId::VimCleanup => editors::vim_cleanup(dist, method),
        HookId::VimConfig => editors::vim_config(dist, method),
        HookId::NeovimCleanup => editors::neovim_cleanup(dist, method),
        HookId::NeovimConfig => editors::neovim_config(dist, method),
        HookId::IdeavimConfig => editors::ideavim_config(dist, method),
        HookId::PycharmRepository => editors::pycharm_repository(dist, method),
        HookId::VscodeRepository => editors::vscode_repository(dist, method),
        HookId::VscodeConfig => editors::vscode_config(dist, method),
    };

    result.with_context(|| format!("Hook {:?} failed", id))
}

/// Run a hook command under the distribution's strictness
fn exec(dist: &Distribution, command: CommandLine) -> Result<()> {
    dist.run_checked(&command)
}

/// `sudo rm -r`, output hidden, result ignored
fn remove_quietly(dist: &Distribution, paths: &[PathBuf]) -> Result<()> {
    let command = CommandLine::new("sudo", ["rm", "-r"])
        .args(paths.iter().map(|p| p.display().to_string()))
        .quiet();
    dist.runner().run(&command)?;
    Ok(())
}

/// Append `text` unless the file already mentions `marker`
fn append_once(path: &Path, marker: &str, text: &str) -> Result<()> {
    let existing = fs::read_to_string(path).unwrap_or_default();
    if existing.contains(marker) {
        return Ok(());
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    if !existing.is_empty() && !existing.ends_with('\n') {
        writeln!(file)?;
    }
    file.write_all(text.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Overwrite a config file, creating its directory
fn write_config(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("✓ Wrote {}", path.display());
    Ok(())
}
