use std::path::PathBuf;
use thiserror::Error;

use breakgate_checker::{CheckerError, CheckerOutput};
use breakgate_git::GitError;

#[derive(Error, Debug)]
pub enum GateError {
    #[error("Cannot resolve {what} '{}': {source}", .reference.display())]
    Resolution {
        what: &'static str,
        reference: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read repository state: {0}")]
    GitState(#[source] GitError),

    #[error("Cannot determine baseline commit: {0}")]
    Baseline(#[source] GitError),

    #[error("Cannot sync mainline branch: {0}")]
    Fetch(#[source] GitError),

    #[error("Checker could not run: {0}")]
    CheckerExecution(#[from] CheckerError),

    #[error("Checker reported breaking changes (exit {})", .output.exit_code)]
    CheckerFailure { output: CheckerOutput },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GateError {
    /// Process exit code for this failure. A checker verdict keeps the
    /// checker's own code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CheckerFailure { output } if output.exit_code != 0 => output.exit_code,
            _ => 1,
        }
    }

    /// Checker output to forward, if the checker got as far as running
    pub fn checker_output(&self) -> Option<&CheckerOutput> {
        match self {
            Self::CheckerFailure { output } => Some(output),
            _ => None,
        }
    }
}
