use serde::Serialize;
use std::time::{Duration, Instant};

use breakgate_git::Mainline;

use crate::ResolvedPaths;

/// Where the gate is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// A developer's commit; the local mainline is trusted
    Interactive,
    /// CI; the local mainline may be stale or absent
    Automated,
}

impl ExecutionMode {
    /// Interpret the value of the `CI` environment variable.
    /// Unset, empty, `false` and `0` mean interactive.
    pub fn from_ci_signal(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some("0") => Self::Interactive,
            Some(v) if v.eq_ignore_ascii_case("false") => Self::Interactive,
            Some(_) => Self::Automated,
        }
    }

    pub fn is_automated(self) -> bool {
        self == Self::Automated
    }
}

/// Everything one gate run needs, fixed at startup
#[derive(Debug, Clone)]
pub struct GateContext {
    pub paths: ResolvedPaths,
    pub mode: ExecutionMode,
    pub mainline: Mainline,
    /// Resolve and report, but neither fetch nor run the checker
    pub dry_run: bool,
    started_at: Instant,
}

impl GateContext {
    pub fn new(paths: ResolvedPaths, mode: ExecutionMode) -> Self {
        Self {
            paths,
            mode,
            mainline: Mainline::default(),
            dry_run: false,
            started_at: Instant::now(),
        }
    }

    pub fn with_mainline(mut self, mainline: Mainline) -> Self {
        self.mainline = mainline;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn total_duration(&self) -> Duration {
        self.started_at.elapsed()
    }
}
