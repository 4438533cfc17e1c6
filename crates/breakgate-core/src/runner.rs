use std::sync::Arc;
use tracing::{debug, info, warn};

use breakgate_checker::{AgainstRef, CheckRequest, Checker, Stream};
use breakgate_git::GitRepo;
use breakgate_logging::{LogEvent, Logger};

use crate::error::GateError;
use crate::outcome::GateOutcome;
use crate::GateContext;

/// Runs one gate pass: merge guard, baseline, check
pub struct GateRunner<'a> {
    git: &'a dyn GitRepo,
    checker: &'a dyn Checker,
    logger: Arc<Logger>,
}

impl<'a> GateRunner<'a> {
    pub fn new(git: &'a dyn GitRepo, checker: &'a dyn Checker, logger: Arc<Logger>) -> Self {
        Self {
            git,
            checker,
            logger,
        }
    }

    /// Run the gate against already-resolved paths.
    ///
    /// Stages run strictly in order and the first failure ends the run.
    /// A merge in progress ends it early with [`GateOutcome::Skipped`].
    pub async fn run(&self, context: &GateContext) -> Result<GateOutcome, GateError> {
        let repo_root = &context.paths.repo_root;

        self.logger.log(&LogEvent::GateStarted {
            repo_root: repo_root.clone(),
            automated: context.mode.is_automated(),
        });

        // Before any fetch: a merge needs no network round trip to be skipped
        let merging = self
            .git
            .merge_in_progress(repo_root)
            .map_err(GateError::GitState)?;
        if merging {
            info!("Merge in progress, skipping breaking-change check");
            self.logger.log(&LogEvent::MergeInProgress);
            return Ok(GateOutcome::skipped("merge in progress"));
        }

        if context.mode.is_automated() {
            if context.dry_run {
                debug!("Dry run, not fetching mainline");
            } else {
                self.git
                    .fetch_mainline(repo_root, &context.mainline)
                    .map_err(GateError::Fetch)?;
                self.logger.log(&LogEvent::MainlineFetched {
                    remote: context.mainline.remote.clone(),
                    branch: context.mainline.branch.clone(),
                });
            }
        }

        let baseline = self
            .git
            .merge_base(repo_root, &context.mainline.branch)
            .map_err(GateError::Baseline)?;
        self.logger.log(&LogEvent::BaselineResolved {
            baseline: baseline.to_string(),
            branch: context.mainline.branch.clone(),
        });

        let request = CheckRequest::new(
            AgainstRef::at_commit(repo_root, baseline.as_str()),
            context.paths.config.clone(),
            repo_root.clone(),
        );
        let command = self.checker.command_line(&request);

        if context.dry_run {
            return Ok(GateOutcome::dry_run(baseline, command));
        }

        self.logger.log(&LogEvent::CheckerStarted { command });
        let output = self.checker.check(&request).await?;
        self.logger.log(&LogEvent::CheckerCompleted {
            exit_code: output.exit_code,
            duration_secs: output.duration.as_secs_f64(),
        });

        if output.success() {
            Ok(GateOutcome::passed(
                baseline,
                output,
                context.total_duration().as_secs_f64(),
            ))
        } else {
            warn!(
                checker = self.checker.name(),
                exit_code = output.exit_code,
                stderr = %String::from_utf8_lossy(&output.bytes(Stream::Stderr)).trim_end(),
                "Checker reported breaking changes"
            );
            Err(GateError::CheckerFailure { output })
        }
    }
}
