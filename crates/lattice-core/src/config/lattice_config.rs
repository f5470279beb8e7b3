//! Top-level Lattice configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::AnalysisConfig;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`LATTICE_*`)
/// 2. Project config (`lattice.toml` in project root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LatticeConfig {
    pub analysis: AnalysisConfig,
}

impl LatticeConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 2: project config
        let project_config_path = root.join("lattice.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 1 (highest priority): environment variables
        Self::apply_env_overrides(&mut config);

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &LatticeConfig) -> Result<(), ConfigError> {
        if let Some(limit) = config.analysis.most_depended_limit {
            if limit == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.most_depended_limit".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        for heuristic in &config.analysis.api_heuristics {
            if heuristic.app_name_pattern.is_empty() || heuristic.domain_pattern.is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.api_heuristics".to_string(),
                    message: "patterns must be non-empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut LatticeConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: LatticeConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` actually carries a value.
    fn merge(base: &mut LatticeConfig, other: &LatticeConfig) {
        if !other.analysis.api_env_markers.is_empty() {
            base.analysis.api_env_markers = other.analysis.api_env_markers.clone();
        }
        if !other.analysis.messaging_keywords.is_empty() {
            base.analysis.messaging_keywords = other.analysis.messaging_keywords.clone();
        }
        if !other.analysis.api_heuristics.is_empty() {
            base.analysis.api_heuristics = other.analysis.api_heuristics.clone();
        }
        if other.analysis.most_depended_limit.is_some() {
            base.analysis.most_depended_limit = other.analysis.most_depended_limit;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `LATTICE_ANALYSIS_MOST_DEPENDED_LIMIT`, comma-separated lists
    /// for `LATTICE_ANALYSIS_MESSAGING_KEYWORDS` / `LATTICE_ANALYSIS_API_ENV_MARKERS`.
    fn apply_env_overrides(config: &mut LatticeConfig) {
        if let Ok(val) = std::env::var("LATTICE_ANALYSIS_MOST_DEPENDED_LIMIT") {
            if let Ok(v) = val.parse::<usize>() {
                config.analysis.most_depended_limit = Some(v);
            }
        }
        if let Ok(val) = std::env::var("LATTICE_ANALYSIS_MESSAGING_KEYWORDS") {
            let keywords: Vec<String> = val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !keywords.is_empty() {
                config.analysis.messaging_keywords = keywords;
            }
        }
        if let Ok(val) = std::env::var("LATTICE_ANALYSIS_API_ENV_MARKERS") {
            let markers: Vec<String> = val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !markers.is_empty() {
                config.analysis.api_env_markers = markers;
            }
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
