use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Structured log events for one gate run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent {
    GateStarted {
        repo_root: PathBuf,
        automated: bool,
    },
    /// The run stops here with success
    MergeInProgress,
    MainlineFetched {
        remote: String,
        branch: String,
    },
    BaselineResolved {
        baseline: String,
        branch: String,
    },
    CheckerStarted {
        command: String,
    },
    CheckerCompleted {
        exit_code: i32,
        duration_secs: f64,
    },
    GateFailed {
        error: String,
    },
}

impl LogEvent {
    /// Progress lines narrate a run that is going fine. The merge-skip
    /// notice and failures are not progress and are always shown.
    pub fn is_progress(&self) -> bool {
        !matches!(self, LogEvent::MergeInProgress | LogEvent::GateFailed { .. })
    }

    /// Add a timestamp to serialize with the event
    fn with_timestamp(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "timestamp".to_string(),
                serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        value
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors
    #[default]
    Pretty,
    /// JSON lines format for machine consumption
    Json,
    /// Compact single-line format
    Compact,
}

/// Logger for gate events. Writes to stderr only.
pub struct Logger {
    format: LogFormat,
    progress: bool,
}

impl Logger {
    pub fn new(format: LogFormat) -> Self {
        Self {
            format,
            progress: true,
        }
    }

    /// Show or hide progress lines (see [`LogEvent::is_progress`])
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn log(&self, event: &LogEvent) {
        if let Some(line) = self.render(event) {
            let _ = writeln!(std::io::stderr(), "{}", line);
        }
    }

    /// Render an event, or `None` if this format does not show it
    pub fn render(&self, event: &LogEvent) -> Option<String> {
        if event.is_progress() && !self.progress {
            return None;
        }
        match self.format {
            LogFormat::Json => Some(event.with_timestamp().to_string()),
            LogFormat::Pretty => self.render_pretty(event),
            LogFormat::Compact => Some(self.render_compact(event)),
        }
    }

    fn render_pretty(&self, event: &LogEvent) -> Option<String> {
        let line = match event {
            LogEvent::GateStarted {
                repo_root,
                automated,
            } => {
                let mode = if *automated { "ci" } else { "local" };
                format!(
                    "{} {} {}",
                    "▶".bright_blue(),
                    "breaking-change check".bold(),
                    format!("({}, {})", repo_root.display(), mode).dimmed()
                )
            }
            LogEvent::MergeInProgress => format!(
                "{} {}",
                "⚠".bright_yellow(),
                "Merge in progress, skipping breaking-change check".bright_yellow()
            ),
            LogEvent::MainlineFetched { remote, branch } => format!(
                "  {} fetched {}/{}",
                "↓".dimmed(),
                remote,
                branch
            ),
            LogEvent::BaselineResolved { baseline, branch } => format!(
                "  {} comparing against merge base {} with {}",
                "→".dimmed(),
                short(baseline).bright_cyan(),
                branch
            ),
            // Debug detail; the tracing layer carries it
            LogEvent::CheckerStarted { .. } => return None,
            LogEvent::CheckerCompleted {
                exit_code,
                duration_secs,
            } => {
                if *exit_code == 0 {
                    format!(
                        "  {} No breaking changes ({:.1}s)",
                        "✓".bright_green(),
                        duration_secs
                    )
                } else {
                    format!(
                        "  {} Breaking changes found, exit {} ({:.1}s)",
                        "✗".bright_red(),
                        exit_code,
                        duration_secs
                    )
                }
            }
            LogEvent::GateFailed { error } => {
                format!("{} {}", "✗".bright_red(), error.bright_red())
            }
        };
        Some(line)
    }

    fn render_compact(&self, event: &LogEvent) -> String {
        let timestamp = chrono::Utc::now().format("%H:%M:%S");
        match event {
            LogEvent::GateStarted { automated, .. } => {
                format!("[{}] gate:start ci={}", timestamp, automated)
            }
            LogEvent::MergeInProgress => format!("[{}] gate:skip merge-in-progress", timestamp),
            LogEvent::MainlineFetched { remote, branch } => {
                format!("[{}] fetch:{}/{}", timestamp, remote, branch)
            }
            LogEvent::BaselineResolved { baseline, .. } => {
                format!("[{}] baseline:{}", timestamp, short(baseline))
            }
            LogEvent::CheckerStarted { command } => {
                format!("[{}] checker:start {}", timestamp, command)
            }
            LogEvent::CheckerCompleted {
                exit_code,
                duration_secs,
            } => format!(
                "[{}] checker:done exit={} {:.1}s",
                timestamp, exit_code, duration_secs
            ),
            LogEvent::GateFailed { error } => format!("[{}] error:{}", timestamp, error),
        }
    }
}

fn short(id: &str) -> &str {
    &id[..id.len().min(12)]
}

/// Whether progress lines should be printed for this log level and format.
///
/// Pretty output stays quiet unless the level asks for `info` or more, so a
/// hook run prints nothing but the checker's own output. Structured formats
/// are requested explicitly and always carry every event.
pub fn progress_enabled(level: &str, format: LogFormat) -> bool {
    if format != LogFormat::Pretty {
        return true;
    }
    match level.parse::<LevelFilter>() {
        Ok(filter) => filter >= LevelFilter::INFO,
        // Per-target directives such as `breakgate=debug`
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_render_is_tagged_and_timestamped() {
        let logger = Logger::new(LogFormat::Json);
        let line = logger
            .render(&LogEvent::BaselineResolved {
                baseline: "abc123".to_string(),
                branch: "master".to_string(),
            })
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["event"], "baseline_resolved");
        assert_eq!(value["baseline"], "abc123");
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_merge_skip_is_reported_in_every_format() {
        for format in [LogFormat::Pretty, LogFormat::Json, LogFormat::Compact] {
            let line = Logger::new(format).render(&LogEvent::MergeInProgress);
            assert!(line.is_some(), "{:?} dropped the skip notice", format);
        }
        let pretty = Logger::new(LogFormat::Pretty)
            .render(&LogEvent::MergeInProgress)
            .unwrap();
        assert!(pretty.contains("skipping"));
    }

    #[test]
    fn test_pretty_hides_checker_command() {
        let logger = Logger::new(LogFormat::Pretty);
        let line = logger.render(&LogEvent::CheckerStarted {
            command: "buf breaking".to_string(),
        });
        assert!(line.is_none());
    }

    #[test]
    fn test_compact_baseline_is_abbreviated() {
        let logger = Logger::new(LogFormat::Compact);
        let line = logger
            .render(&LogEvent::BaselineResolved {
                baseline: "0123456789abcdef0123456789abcdef01234567".to_string(),
                branch: "master".to_string(),
            })
            .unwrap();
        assert!(line.ends_with("baseline:0123456789ab"));
    }

    #[test]
    fn test_quiet_logger_keeps_skip_notice_and_failures() {
        let logger = Logger::new(LogFormat::Pretty).with_progress(false);
        let started = LogEvent::GateStarted {
            repo_root: PathBuf::from("/repo"),
            automated: false,
        };
        let completed = LogEvent::CheckerCompleted {
            exit_code: 0,
            duration_secs: 0.2,
        };

        assert!(logger.render(&started).is_none());
        assert!(logger.render(&completed).is_none());
        assert!(logger.render(&LogEvent::MergeInProgress).is_some());
        assert!(logger
            .render(&LogEvent::GateFailed {
                error: "no merge base".to_string()
            })
            .is_some());
    }

    #[test]
    fn test_progress_follows_level_for_pretty_output() {
        assert!(!progress_enabled("warn", LogFormat::Pretty));
        assert!(!progress_enabled("error", LogFormat::Pretty));
        assert!(progress_enabled("info", LogFormat::Pretty));
        assert!(progress_enabled("DEBUG", LogFormat::Pretty));
        assert!(progress_enabled("breakgate=debug", LogFormat::Pretty));
    }

    #[test]
    fn test_structured_formats_always_show_progress() {
        assert!(progress_enabled("warn", LogFormat::Json));
        assert!(progress_enabled("off", LogFormat::Compact));
    }
}
