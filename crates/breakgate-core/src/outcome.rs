use serde::Serialize;

use breakgate_checker::CheckerOutput;
use breakgate_git::Baseline;

/// How a gate run ended without error
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GateOutcome {
    /// Check deliberately not run
    Skipped { reason: String },
    /// Checker ran and found nothing
    Passed {
        baseline: Baseline,
        output: CheckerOutput,
        total_duration_secs: f64,
    },
    /// Baseline resolved; checker not run on request
    DryRun { baseline: Baseline, command: String },
}

impl GateOutcome {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }

    pub fn passed(baseline: Baseline, output: CheckerOutput, total_duration_secs: f64) -> Self {
        Self::Passed {
            baseline,
            output,
            total_duration_secs,
        }
    }

    pub fn dry_run(baseline: Baseline, command: String) -> Self {
        Self::DryRun { baseline, command }
    }

    /// Checker output to forward, if the checker ran
    pub fn checker_output(&self) -> Option<&CheckerOutput> {
        match self {
            Self::Passed { output, .. } => Some(output),
            _ => None,
        }
    }

    pub fn exit_code(&self) -> i32 {
        0
    }
}
