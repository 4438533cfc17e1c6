use git2::{BranchType, ErrorCode, Repository};
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

use crate::{Baseline, GitRepo, Mainline};

/// Pseudo-ref git writes while a merge is stopped for conflicts or `--no-commit`
const MERGE_HEAD: &str = "MERGE_HEAD";

#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository: {0}")]
    NotARepo(String),

    #[error("Git operation failed: {0}")]
    GitOperationFailed(#[from] git2::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("No commits in repository")]
    NoCommits,

    #[error("Mainline branch '{0}' does not exist locally")]
    MissingMainline(String),

    #[error("HEAD ({head}) and '{branch}' have no common ancestor")]
    NoCommonAncestor { head: String, branch: String },

    #[error("`{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },
}

/// Git access through libgit2, with the `git` executable for network fetches
#[derive(Debug, Clone)]
pub struct LocalGit {
    /// Executable used for `git fetch`
    git_binary: PathBuf,
}

impl Default for LocalGit {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalGit {
    pub fn new() -> Self {
        Self {
            git_binary: PathBuf::from("git"),
        }
    }

    pub fn with_git_binary(mut self, path: PathBuf) -> Self {
        self.git_binary = path;
        self
    }

    fn open(&self, workdir: &Path) -> Result<Repository, GitError> {
        Repository::open(workdir).map_err(|e| match e.code() {
            ErrorCode::NotFound => GitError::NotARepo(workdir.display().to_string()),
            _ => GitError::GitOperationFailed(e),
        })
    }

    /// Build a git command rooted at `workdir` that never prompts for input
    fn git_command(&self, workdir: &Path) -> Command {
        let mut cmd = Command::new(&self.git_binary);
        cmd.current_dir(workdir);
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        cmd
    }
}

impl GitRepo for LocalGit {
    fn merge_in_progress(&self, workdir: &Path) -> Result<bool, GitError> {
        let repo = self.open(workdir)?;

        let in_progress = match repo.find_reference(MERGE_HEAD) {
            Ok(_) => true,
            Err(e) if e.code() == ErrorCode::NotFound => false,
            Err(e) => return Err(GitError::GitOperationFailed(e)),
        };

        debug!(in_progress, "Checked merge state");
        Ok(in_progress)
    }

    fn fetch_mainline(&self, workdir: &Path, mainline: &Mainline) -> Result<(), GitError> {
        let refspec = mainline.refspec();
        let args = ["fetch", mainline.remote.as_str(), refspec.as_str()];

        debug!(
            remote = %mainline.remote,
            refspec = %refspec,
            "Fetching mainline"
        );

        let output = self.git_command(workdir).args(args).output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                stderr,
            });
        }

        Ok(())
    }

    fn merge_base(&self, workdir: &Path, branch: &str) -> Result<Baseline, GitError> {
        let repo = self.open(workdir)?;

        let head = match repo.head() {
            Ok(head) => head.peel_to_commit()?.id(),
            Err(e) if e.code() == ErrorCode::UnbornBranch => return Err(GitError::NoCommits),
            Err(e) => return Err(GitError::GitOperationFailed(e)),
        };

        let tip = match repo.find_branch(branch, BranchType::Local) {
            Ok(b) => b.get().peel_to_commit()?.id(),
            Err(e) if e.code() == ErrorCode::NotFound => {
                return Err(GitError::MissingMainline(branch.to_string()))
            }
            Err(e) => return Err(GitError::GitOperationFailed(e)),
        };

        let base = match repo.merge_base(head, tip) {
            Ok(oid) => oid,
            Err(e) if e.code() == ErrorCode::NotFound => {
                return Err(GitError::NoCommonAncestor {
                    head: head.to_string(),
                    branch: branch.to_string(),
                })
            }
            Err(e) => return Err(GitError::GitOperationFailed(e)),
        };

        debug!(head = %head, tip = %tip, base = %base, "Computed merge base");

        Ok(Baseline::from(base))
    }
}
