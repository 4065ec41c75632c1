//! Generator configuration, loaded from `.json` or `.ron`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::logging::TracingConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid RON config: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("unsupported config extension `{0}` (expected .json or .ron)")]
    UnsupportedFormat(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Seed used when the caller does not supply one
    pub default_seed: u64,
    pub default_depth: u32,
    pub pretty_output: bool,
    pub tracing: TracingConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_seed: 42,
            default_depth: 1,
            pretty_output: false,
            tracing: TracingConfig::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "json" => Self::from_json(&content),
            "ron" => Self::from_ron(&content),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.default_seed, 42);
        assert_eq!(config.default_depth, 1);
        assert!(!config.pretty_output);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GeneratorConfig::from_json(r#"{"default_seed": 7}"#).unwrap();
        assert_eq!(config.default_seed, 7);
        assert_eq!(config.default_depth, 1);
        assert_eq!(config.tracing, TracingConfig::default());
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"default_depth": 3, "pretty_output": true, "tracing": {{"default_level": "Debug"}}}}"#
        )
        .unwrap();
        let config = GeneratorConfig::load(file.path()).unwrap();
        assert_eq!(config.default_depth, 3);
        assert!(config.pretty_output);
        assert_eq!(config.tracing.default_level, LogLevel::Debug);
    }

    #[test]
    fn test_load_ron_file() {
        let mut file = tempfile::Builder::new().suffix(".ron").tempfile().unwrap();
        write!(file, "(default_seed: 99, pretty_output: true)").unwrap();
        let config = GeneratorConfig::load(file.path()).unwrap();
        assert_eq!(config.default_seed, 99);
        assert!(config.pretty_output);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = NamedTempFile::new().unwrap();
        let result = GeneratorConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = GeneratorConfig::load("does/not/exist.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            GeneratorConfig::from_json("{oops"),
            Err(ConfigError::Json(_))
        ));
    }
}
