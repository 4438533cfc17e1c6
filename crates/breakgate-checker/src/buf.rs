use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{CheckRequest, Checker, CheckerError, CheckerOutput, ProcessSpawner};

/// `buf breaking` as the compatibility checker
pub struct BufChecker {
    binary_path: PathBuf,
}

impl BufChecker {
    pub fn new() -> Self {
        Self {
            binary_path: PathBuf::from("buf"),
        }
    }

    pub fn with_binary_path(path: PathBuf) -> Self {
        Self { binary_path: path }
    }
}

impl Default for BufChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Checker for BufChecker {
    fn name(&self) -> &str {
        "buf"
    }

    fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    fn args(&self, request: &CheckRequest) -> Vec<String> {
        vec![
            "breaking".to_string(),
            "--against".to_string(),
            request.against.to_string(),
            "--config".to_string(),
            request.config_path.display().to_string(),
        ]
    }

    async fn check(&self, request: &CheckRequest) -> Result<CheckerOutput, CheckerError> {
        debug!(
            checker = self.name(),
            against = %request.against,
            "Executing checker"
        );

        let args = self.args(request);
        ProcessSpawner::spawn(&self.binary_path, &args, &request.working_dir).await
    }
}
