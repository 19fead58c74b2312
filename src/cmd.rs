use anyhow::{Context, Result};
use crossterm::style::Stylize;
use std::fmt;
use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::Error;

/// A program plus its arguments, run without a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
    /// Discard the child's stdout/stderr instead of showing it
    pub quiet: bool,
}

impl CommandLine {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            quiet: false,
        }
    }

    /// Split a command written as one string on whitespace.
    pub fn parse(text: &str) -> Result<Self> {
        let mut parts = text.split_whitespace();
        let program = parts.next().ok_or(Error::EmptyCommand)?;
        Ok(Self::new(program, parts))
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// How a finished process exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exit {
    pub code: Option<i32>,
}

impl Exit {
    pub const SUCCESS: Exit = Exit { code: Some(0) };

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Capability to run external programs.
///
/// Errors are reserved for processes that could not be started at all;
/// a non-zero exit is reported through [`Exit`] and left to the caller.
pub trait Runner: Send + Sync {
    /// Run to completion with inherited stdio (unless quiet)
    fn run(&self, command: &CommandLine) -> Result<Exit>;

    /// Run to completion and capture stdout along with the exit
    fn output_with_status(&self, command: &CommandLine) -> Result<(String, Exit)>;

    /// Run to completion and capture stdout, whatever the exit
    fn output(&self, command: &CommandLine) -> Result<String> {
        self.output_with_status(command).map(|(stdout, _)| stdout)
    }

    /// Run to completion, feeding `input` on stdin
    fn run_with_stdin(&self, command: &CommandLine, input: &[u8]) -> Result<Exit>;

    /// Whether `binary` resolves on PATH
    fn exists(&self, binary: &str) -> bool;

    /// Feed the stdout of `source` into the stdin of `sink`.
    ///
    /// A failing source ends the pipe with its own exit; `sink` never runs.
    fn pipe(&self, source: &CommandLine, sink: &CommandLine) -> Result<Exit> {
        let (output, exit) = self.output_with_status(source)?;
        if !exit.success() {
            tracing::warn!("`{}` exited with code {:?}, not running `{}`", source, exit.code, sink);
            return Ok(exit);
        }
        self.run_with_stdin(sink, output.as_bytes())
    }
}

/// Runs commands on the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct System;

fn echo(command: &CommandLine) {
    println!("{}", format!("> {}", command).cyan());
}

fn build(command: &CommandLine) -> Command {
    let mut process = Command::new(&command.program);
    process.args(&command.args);
    if command.quiet {
        process.stdout(Stdio::null()).stderr(Stdio::null());
    }
    process
}

impl Runner for System {
    fn run(&self, command: &CommandLine) -> Result<Exit> {
        echo(command);

        let status = build(command)
            .status()
            .with_context(|| format!("Failed to run {}", command.program))?;

        Ok(Exit {
            code: status.code(),
        })
    }

    fn output_with_status(&self, command: &CommandLine) -> Result<(String, Exit)> {
        tracing::debug!("capturing output of `{}`", command);

        let output = Command::new(&command.program)
            .args(&command.args)
            .stderr(Stdio::null())
            .output()
            .with_context(|| format!("Failed to run {}", command.program))?;

        if !output.status.success() {
            tracing::debug!(
                "`{}` exited with code {:?}",
                command,
                output.status.code()
            );
        }

        Ok((
            String::from_utf8_lossy(&output.stdout).into_owned(),
            Exit {
                code: output.status.code(),
            },
        ))
    }

    fn run_with_stdin(&self, command: &CommandLine, input: &[u8]) -> Result<Exit> {
        echo(command);

        let mut child = build(command)
            .stdin(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to run {}", command.program))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input)?;
        }

        let status = child.wait()?;
        Ok(Exit {
            code: status.code(),
        })
    }

    fn exists(&self, binary: &str) -> bool {
        which::which(binary).is_ok()
    }
}
