use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::GateError;

/// The three locations the gate is configured with, as given
#[derive(Debug, Clone)]
pub struct PathRefs {
    /// Checker executable, possibly a symlink
    pub checker: PathBuf,
    /// Checker configuration file, possibly a symlink
    pub config: PathBuf,
    /// A file at the repository root, possibly a symlink
    pub workspace: PathBuf,
}

/// Canonical locations, every one known to exist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPaths {
    pub checker: PathBuf,
    pub config: PathBuf,
    pub repo_root: PathBuf,
}

impl ResolvedPaths {
    /// Follow every reference to a concrete, existing path.
    ///
    /// Touches nothing but the filesystem; git is never consulted here.
    pub fn resolve(refs: &PathRefs) -> Result<Self, GateError> {
        let checker = canonical("checker binary", &refs.checker)?;
        let config = canonical("checker config", &refs.config)?;
        let workspace = canonical("workspace", &refs.workspace)?;

        let repo_root = workspace
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| GateError::Resolution {
                what: "workspace",
                reference: refs.workspace.clone(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "has no parent directory"),
            })?;

        debug!(
            checker = %checker.display(),
            config = %config.display(),
            repo_root = %repo_root.display(),
            "Resolved paths"
        );

        Ok(Self {
            checker,
            config,
            repo_root,
        })
    }
}

fn canonical(what: &'static str, reference: &Path) -> Result<PathBuf, GateError> {
    reference
        .canonicalize()
        .map_err(|source| GateError::Resolution {
            what,
            reference: reference.to_path_buf(),
            source,
        })
}
