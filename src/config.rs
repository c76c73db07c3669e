use crate::error::{DefineError, DefineResult};
use crate::fuzzy_map::DEFAULT_CUTOFF;
use crate::render::{RenderOptions, DEFAULT_SUBSTITUTION_THRESHOLD};
use crate::utils::Metric;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Number of "did you mean" lines printed for a miss
pub const DEFAULT_SUGGESTIONS: usize = 3;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Data
    pub data_path: Option<PathBuf>,

    // Matching
    pub cutoff: f64,
    pub metric: Metric,

    // Output
    pub substitution_threshold: f64,
    pub color: bool,
    pub suggestions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            cutoff: DEFAULT_CUTOFF,
            metric: Metric::default(),
            substitution_threshold: DEFAULT_SUBSTITUTION_THRESHOLD,
            color: true,
            suggestions: DEFAULT_SUGGESTIONS,
        }
    }
}

impl Config {
    /// Load config from the default location, or use defaults
    pub fn load() -> DefineResult<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from `path`
    ///
    /// A missing file yields defaults. A corrupt file is moved aside to
    /// `config.json.corrupt` and defaults are used.
    pub fn load_from(path: &Path) -> DefineResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str::<Self>(&content) {
            Ok(config) => {
                config.validate()?;
                Ok(config)
            }
            Err(e) => {
                // Graceful degradation: log warning and use defaults
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                // Backup corrupt file for debugging
                let backup_path = path.with_extension("json.corrupt");
                let _ = std::fs::rename(path, &backup_path);
                Ok(Self::default())
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> DefineResult<PathBuf> {
        let path = config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> DefineResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject thresholds that cannot be compared
    pub fn validate(&self) -> DefineResult<()> {
        if self.cutoff.is_nan() {
            return Err(DefineError::Config("cutoff must be a number".to_string()));
        }
        if self.substitution_threshold.is_nan() {
            return Err(DefineError::Config(
                "substitution_threshold must be a number".to_string(),
            ));
        }
        Ok(())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            color: self.color,
            substitution_threshold: self.substitution_threshold,
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("econ-define")
        .join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.cutoff, 0.6);
        assert_eq!(config.metric, Metric::Sequence);
        assert_eq!(config.substitution_threshold, 0.97);
        assert!(config.color);
        assert_eq!(config.data_path, None);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            metric: Metric::Levenshtein,
            data_path: Some(PathBuf::from("/tmp/terms.json")),
            ..Config::default()
        };
        let json = serde_json::to_string(&config).expect("Failed to serialize");
        assert!(json.contains("\"levenshtein\""));
        let restored: Config = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(config, restored);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{ "cutoff": 0.8 }"#).expect("partial config");
        assert_eq!(config.cutoff, 0.8);
        assert_eq!(config.suggestions, DEFAULT_SUGGESTIONS);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = Config::load_from(&dir.path().join("config.json")).expect("defaults");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_corrupt_file_is_backed_up() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not valid json").expect("Failed to write config");

        let config = Config::load_from(&path).expect("defaults");
        assert_eq!(config, Config::default());
        assert!(!path.exists());
        assert!(dir.path().join("config.json.corrupt").exists());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            cutoff: 0.75,
            color: false,
            ..Config::default()
        };
        config.save_to(&path).expect("Failed to save");
        assert_eq!(Config::load_from(&path).expect("reload"), config);
    }
}
