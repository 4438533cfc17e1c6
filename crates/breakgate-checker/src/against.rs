use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// The whole repository as it was at one commit, in buf's input syntax
/// (`<repo>/.git#ref=<commit>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgainstRef {
    pub git_dir: PathBuf,
    pub commit: String,
}

impl AgainstRef {
    pub fn at_commit(repo_root: &Path, commit: impl Into<String>) -> Self {
        Self {
            git_dir: repo_root.join(".git"),
            commit: commit.into(),
        }
    }
}

impl fmt::Display for AgainstRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#ref={}", self.git_dir.display(), self.commit)
    }
}
