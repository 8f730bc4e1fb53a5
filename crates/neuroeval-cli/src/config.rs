//! CLI configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use neuroeval_core::defuzzify::Resolution;
use neuroeval_core::history::DEFAULT_HISTORY_LIMIT;

/// Top-level neuroeval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeuroevalConfig {
    /// Defuzzification sampling step.
    #[serde(default)]
    pub resolution: Resolution,
    /// Maximum number of entries kept in an evaluation history.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Score points a student must move before `compare` reports it.
    #[serde(default = "default_regression_threshold")]
    pub regression_threshold: f64,
    /// Output directory for reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Report format used by `batch` when none is given.
    #[serde(default = "default_format")]
    pub default_format: String,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}
fn default_regression_threshold() -> f64 {
    5.0
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./neuroeval-results")
}
fn default_format() -> String {
    "json".to_string()
}

impl Default for NeuroevalConfig {
    fn default() -> Self {
        Self {
            resolution: Resolution::default(),
            history_limit: default_history_limit(),
            regression_threshold: default_regression_threshold(),
            output_dir: default_output_dir(),
            default_format: default_format(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. the explicit path, which must exist
/// 2. `neuroeval.toml` in the current directory
/// 3. `~/.config/neuroeval/config.toml`
///
/// `NEUROEVAL_OUTPUT_DIR` overrides `output_dir`.
pub fn load_config_from(path: Option<&Path>) -> Result<NeuroevalConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("neuroeval.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => NeuroevalConfig::default(),
    };

    if let Ok(dir) = std::env::var("NEUROEVAL_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }

    config.output_dir = PathBuf::from(resolve_env_vars(&config.output_dir.to_string_lossy()));

    Ok(config)
}

fn parse_config(content: &str) -> Result<NeuroevalConfig> {
    let config: NeuroevalConfig = toml::from_str(content)?;
    anyhow::ensure!(config.history_limit >= 1, "history_limit must be at least 1");
    anyhow::ensure!(
        config.regression_threshold >= 0.0,
        "regression_threshold must not be negative"
    );
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("neuroeval"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_NEUROEVAL_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_NEUROEVAL_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_NEUROEVAL_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_NEUROEVAL_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = NeuroevalConfig::default();
        assert_eq!(config.resolution, Resolution::UNIT);
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.regression_threshold, 5.0);
        assert_eq!(config.default_format, "json");
    }

    #[test]
    fn parse_full_config() {
        let config = parse_config(
            r#"
resolution = 0.5
history_limit = 10
regression_threshold = 2.5
output_dir = "out"
default_format = "html"
"#,
        )
        .unwrap();
        assert_eq!(config.resolution.step(), 0.5);
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.regression_threshold, 2.5);
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.default_format, "html");
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config = parse_config("history_limit = 5\n").unwrap();
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.resolution, Resolution::UNIT);
        assert_eq!(config.output_dir, PathBuf::from("./neuroeval-results"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(parse_config("resolution = 0.0\n").is_err());
        assert!(parse_config("resolution = 250.0\n").is_err());
        assert!(parse_config("history_limit = 0\n").is_err());
        assert!(parse_config("regression_threshold = -1.0\n").is_err());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/neuroeval.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "regression_threshold = 1.0\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.regression_threshold, 1.0);
    }
}
