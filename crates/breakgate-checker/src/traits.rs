use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::{AgainstRef, CheckerOutput};

/// Errors that keep the checker from producing a verdict
#[derive(Error, Debug)]
pub enum CheckerError {
    #[error("Failed to spawn checker process: {0}")]
    SpawnFailed(#[from] std::io::Error),

    #[error("Checker not found at path: {0}")]
    NotFound(String),

    #[error("Checker was terminated by a signal")]
    Terminated,

    #[error("Failed to read checker output: {0}")]
    OutputFailed(String),
}

/// One breaking-change check
#[derive(Debug, Clone)]
pub struct CheckRequest {
    /// Repository state to compare the working tree against
    pub against: AgainstRef,
    /// Checker configuration file
    pub config_path: PathBuf,
    /// Directory the checker runs in; relative schema paths resolve from here
    pub working_dir: PathBuf,
}

impl CheckRequest {
    pub fn new(against: AgainstRef, config_path: PathBuf, working_dir: PathBuf) -> Self {
        Self {
            against,
            config_path,
            working_dir,
        }
    }
}

/// An external schema-compatibility checker
#[async_trait]
pub trait Checker: Send + Sync {
    /// Human-readable name (e.g., "buf")
    fn name(&self) -> &str;

    /// Get the path to the checker binary
    fn binary_path(&self) -> &Path;

    /// Command-line arguments for `request`
    fn args(&self, request: &CheckRequest) -> Vec<String>;

    /// Run the check. A non-zero exit is still `Ok`; only failing to get a
    /// verdict at all is an error.
    async fn check(&self, request: &CheckRequest) -> Result<CheckerOutput, CheckerError>;

    /// Shell-style rendering of the invocation, for dry runs and logs
    fn command_line(&self, request: &CheckRequest) -> String {
        let mut parts = vec![self.binary_path().display().to_string()];
        parts.extend(self.args(request));
        parts.join(" ")
    }
}
