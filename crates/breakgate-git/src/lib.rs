//! # breakgate-git
//!
//! Repository queries for the breakgate pre-commit gate.
//!
//! The gate needs three things from git, always in this order:
//! - whether a merge is in progress (a `MERGE_HEAD` exists)
//! - in CI only, a refresh of the local mainline branch from its remote
//! - the merge base of `HEAD` and the local mainline branch
//!
//! ## Key Types
//!
//! - [`GitRepo`] - The seam the gate talks to; fakes implement it in tests
//! - [`LocalGit`] - Implementation backed by libgit2 and the `git` executable
//! - [`Baseline`] - A merge-base commit id
//! - [`Mainline`] - Remote and branch naming the integration branch
//!
//! ## Usage
//!
//! ```rust,ignore
//! use breakgate_git::{GitRepo, LocalGit, Mainline};
//!
//! let git = LocalGit::new();
//! let mainline = Mainline::default();
//! if !git.merge_in_progress(&repo_root)? {
//!     let baseline = git.merge_base(&repo_root, &mainline.branch)?;
//!     println!("comparing against {}", baseline);
//! }
//! ```

mod baseline;
mod local;
mod mainline;

pub use baseline::Baseline;
pub use local::{GitError, LocalGit};
pub use mainline::Mainline;

use std::path::Path;

/// Repository operations the gate depends on.
///
/// Every method takes the repository working-tree root explicitly; no
/// implementation caches state between calls.
pub trait GitRepo: Send + Sync {
    /// True when the repository has an unfinished merge.
    fn merge_in_progress(&self, workdir: &Path) -> Result<bool, GitError>;

    /// Update the local mainline branch to match its remote counterpart.
    fn fetch_mainline(&self, workdir: &Path, mainline: &Mainline) -> Result<(), GitError>;

    /// Nearest common ancestor of `HEAD` and the local branch `branch`.
    fn merge_base(&self, workdir: &Path, branch: &str) -> Result<Baseline, GitError>;
}
