use std::sync::Arc;

use breakgate_checker::BufChecker;
use breakgate_core::{
    ExecutionMode, GateContext, GateError, GateOutcome, GateRunner, PathRefs, ResolvedPaths,
};
use breakgate_git::GitRepo;
use breakgate_logging::Logger;

use crate::config::ProjectConfig;

/// Startup configuration, read once from flags and the environment
#[derive(Debug, Clone)]
pub struct GateSettings {
    pub refs: PathRefs,
    pub mode: ExecutionMode,
    pub dry_run: bool,
}

/// Resolve paths, load the project file, then run the gate.
///
/// Path resolution and config loading finish before `git` sees any call.
pub async fn execute(
    settings: &GateSettings,
    git: &dyn GitRepo,
    logger: Arc<Logger>,
) -> Result<GateOutcome, GateError> {
    let paths = ResolvedPaths::resolve(&settings.refs)?;

    let project = ProjectConfig::load(&paths.repo_root)
        .map_err(|e| GateError::Config(format!("{:#}", e)))?
        .unwrap_or_default();

    let checker = BufChecker::with_binary_path(paths.checker.clone());
    let context = GateContext::new(paths, settings.mode)
        .with_mainline(project.mainline())
        .with_dry_run(settings.dry_run);

    GateRunner::new(git, &checker, logger).run(&context).await
}
