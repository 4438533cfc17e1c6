//! Project configuration file support for breakgate.
//!
//! Loads configuration from `breakgate.toml` at the repository root.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use breakgate_git::Mainline;

/// Project-level configuration loaded from `breakgate.toml`
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Integration branch settings
    #[serde(default)]
    pub mainline: MainlineConfig,
}

/// The `[mainline]` table
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct MainlineConfig {
    /// Remote to fetch the mainline from in CI
    pub remote: Option<String>,
    /// Local mainline branch name
    pub branch: Option<String>,
}

/// The config file name
pub const CONFIG_FILE_NAME: &str = "breakgate.toml";

impl ProjectConfig {
    /// Load configuration from the repository root.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if file exists and parses successfully
    /// - `Ok(None)` if file does not exist
    /// - `Err(...)` if file exists but fails to parse (hard error)
    pub fn load(repo_root: &Path) -> Result<Option<Self>> {
        let config_path = repo_root.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(Some(config))
    }

    /// The effective mainline; unset fields keep `origin`/`master`.
    pub fn mainline(&self) -> Mainline {
        let defaults = Mainline::default();
        Mainline::new(
            self.mainline.remote.clone().unwrap_or(defaults.remote),
            self.mainline.branch.clone().unwrap_or(defaults.branch),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempdir().unwrap();
        assert!(ProjectConfig::load(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_defaults_when_table_absent() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "").unwrap();

        let config = ProjectConfig::load(dir.path()).unwrap().unwrap();

        assert_eq!(config.mainline(), Mainline::default());
    }

    #[test]
    fn test_partial_override() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[mainline]\nbranch = \"main\"\n",
        )
        .unwrap();

        let config = ProjectConfig::load(dir.path()).unwrap().unwrap();

        assert_eq!(config.mainline(), Mainline::new("origin", "main"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[mainline]\ntrunk = \"main\"\n",
        )
        .unwrap();

        let err = ProjectConfig::load(dir.path()).unwrap_err();

        assert!(format!("{:#}", err).contains("Failed to parse"));
    }
}
