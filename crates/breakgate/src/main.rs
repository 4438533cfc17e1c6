mod config;
mod gate;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use breakgate_checker::{CheckerOutput, Stream};
use breakgate_core::{ExecutionMode, GateError, GateOutcome, PathRefs};
use breakgate_git::LocalGit;
use breakgate_logging::{init_tracing, progress_enabled, LogEvent, LogFormat, Logger};

use crate::gate::GateSettings;

#[derive(Parser, Debug)]
#[command(
    name = "breakgate",
    about = "Pre-commit gate that blocks breaking schema changes",
    version,
    author
)]
struct Cli {
    /// Compatibility-checker executable (symlinks are followed)
    #[arg(long, env = "BREAKGATE_CHECKER")]
    checker: PathBuf,

    /// Checker configuration file (symlinks are followed)
    #[arg(long, env = "BREAKGATE_CONFIG")]
    config: PathBuf,

    /// A file at the repository root; its directory is the repository
    #[arg(long, env = "BREAKGATE_WORKSPACE")]
    workspace: PathBuf,

    /// Run as in CI (also enabled by the CI environment variable)
    #[arg(long)]
    ci: bool,

    /// Resolve the baseline and print the check command without running it
    #[arg(long)]
    dry_run: bool,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormatChoice,

    /// Tracing filter when RUST_LOG is unset; `info` or more also prints
    /// progress lines in the pretty format
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print the outcome as JSON on stderr
    #[arg(long)]
    json_output: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

impl Cli {
    fn settings(&self) -> GateSettings {
        self.settings_with_ci_signal(std::env::var("CI").ok().as_deref())
    }

    fn settings_with_ci_signal(&self, ci: Option<&str>) -> GateSettings {
        let mode = if self.ci {
            ExecutionMode::Automated
        } else {
            ExecutionMode::from_ci_signal(ci)
        };

        GateSettings {
            refs: PathRefs {
                checker: self.checker.clone(),
                config: self.config.clone(),
                workspace: self.workspace.clone(),
            },
            mode,
            dry_run: self.dry_run,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_format: LogFormat = cli.log_format.into();
    init_tracing(&cli.log_level, log_format);
    let logger = Arc::new(
        Logger::new(log_format).with_progress(progress_enabled(&cli.log_level, log_format)),
    );

    let settings = cli.settings();
    let git = LocalGit::new();

    let result = gate::execute(&settings, &git, logger.clone()).await;
    let exit_code = report(
        &cli,
        &logger,
        result,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )?;

    std::process::exit(exit_code);
}

/// Forward checker output, print summaries, and pick the exit code
fn report(
    cli: &Cli,
    logger: &Logger,
    result: Result<GateOutcome, GateError>,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<i32> {
    match result {
        Ok(outcome) => {
            if let Some(output) = outcome.checker_output() {
                forward(output, out, err)?;
            }
            if let GateOutcome::DryRun { command, .. } = &outcome {
                writeln!(out, "{}", command)?;
            }
            if cli.json_output {
                writeln!(err, "{}", serde_json::to_string_pretty(&outcome)?)?;
            }
            Ok(outcome.exit_code())
        }
        Err(failure) => {
            match failure.checker_output() {
                Some(output) => forward(output, out, err)?,
                None => logger.log(&LogEvent::GateFailed {
                    error: failure.to_string(),
                }),
            }
            if cli.json_output {
                let summary = serde_json::json!({
                    "status": "failed",
                    "error": failure.to_string(),
                    "exit_code": failure.exit_code(),
                });
                writeln!(err, "{}", serde_json::to_string_pretty(&summary)?)?;
            }
            Ok(failure.exit_code())
        }
    }
}

/// Replay the checker's output in the order it was produced, bytes unchanged
fn forward(output: &CheckerOutput, out: &mut impl Write, err: &mut impl Write) -> Result<()> {
    for chunk in &output.chunks {
        let target: &mut dyn Write = match chunk.stream {
            Stream::Stdout => &mut *out,
            Stream::Stderr => &mut *err,
        };
        target.write_all(&chunk.bytes)?;
        target.flush()?;
    }
    Ok(())
}
