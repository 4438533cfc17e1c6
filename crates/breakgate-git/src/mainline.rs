use serde::{Deserialize, Serialize};

/// The shared integration branch feature work is compared against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mainline {
    /// Remote fetched from in automated mode
    pub remote: String,
    /// Local branch name, also used as the remote branch name
    pub branch: String,
}

pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_BRANCH: &str = "master";

impl Default for Mainline {
    fn default() -> Self {
        Self {
            remote: DEFAULT_REMOTE.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

impl Mainline {
    pub fn new(remote: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            remote: remote.into(),
            branch: branch.into(),
        }
    }

    /// Refspec that writes the remote branch straight into the local one
    pub fn refspec(&self) -> String {
        format!("{0}:{0}", self.branch)
    }
}
