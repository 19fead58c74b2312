use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions callers may want to match on.
///
/// Everything else travels as `anyhow::Error` with context attached.
#[derive(Debug, Error)]
pub enum Error {
    #[error("distribution not found: no supported distribution named in {}", path.display())]
    UnknownDistribution { path: PathBuf },

    #[error("{0} could not be determined")]
    MissingEnv(&'static str),

    #[error("`{command}` failed with exit code {code:?}")]
    CommandFailed { command: String, code: Option<i32> },

    #[error("no command provided")]
    EmptyCommand,
}
