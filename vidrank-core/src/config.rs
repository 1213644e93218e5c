use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::{RecommendationThresholds, TierThresholds};
use crate::error::ConfigError;
use crate::score::ScoreWeights;

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "vidrank.toml";

/// Top-level vidrank configuration, matching `vidrank.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VidrankConfig {
    #[serde(default)]
    pub scoring: ScoreWeights,
    #[serde(default)]
    pub tiers: TierThresholds,
    #[serde(default)]
    pub filters: FiltersSection,
    #[serde(default)]
    pub recommendations: RecommendationThresholds,
    #[serde(default)]
    pub render: RenderSection,
    #[serde(default)]
    pub cache: CacheSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiltersSection {
    /// Items at or under this length count as short-form.
    pub short_threshold_seconds: u64,
    /// Items selected for the top/bottom view when the caller gives no count.
    pub default_count: usize,
}

impl Default for FiltersSection {
    fn default() -> Self {
        Self {
            short_threshold_seconds: 180,
            default_count: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSection {
    /// Markdown output is cut past this many characters.
    pub max_chars: usize,
    pub csv_delimiter: char,
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            max_chars: 25_000,
            csv_delimiter: ',',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSection {
    pub ttl_seconds: u64,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self { ttl_seconds: 300 }
    }
}

impl VidrankConfig {
    /// Read, parse, and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml(&text)?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Load `path` when given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.scoring;
        let weights = [w.like_weight, w.comment_weight];
        if weights.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ConfigError::Invalid(format!(
                "scoring weights must be finite and non-negative, got {weights:?}"
            )));
        }
        if !w.scale.is_finite() || w.scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "scoring scale must be positive, got {}",
                w.scale
            )));
        }

        self.tiers.validate()?;

        let r = &self.recommendations;
        if r.low_viral_ratio > r.high_viral_ratio {
            return Err(ConfigError::Invalid(
                "recommendations.low_viral_ratio exceeds high_viral_ratio".into(),
            ));
        }
        if r.low_engagement > r.high_engagement {
            return Err(ConfigError::Invalid(
                "recommendations.low_engagement exceeds high_engagement".into(),
            ));
        }

        if self.render.max_chars == 0 {
            return Err(ConfigError::Invalid("render.max_chars must be positive".into()));
        }
        if matches!(self.render.csv_delimiter, '"' | '\n' | '\r') {
            return Err(ConfigError::Invalid(format!(
                "render.csv_delimiter cannot be {:?}",
                self.render.csv_delimiter
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(VidrankConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = VidrankConfig::from_toml(
            "[scoring]\nlike_weight = 0.7\n\n[filters]\nshort_threshold_seconds = 60\n",
        )
        .unwrap();
        assert!((config.scoring.like_weight - 0.7).abs() < f64::EPSILON);
        assert!((config.scoring.comment_weight - 0.4).abs() < f64::EPSILON);
        assert_eq!(config.filters.short_threshold_seconds, 60);
        assert_eq!(config.filters.default_count, 20);
        assert_eq!(config.tiers, TierThresholds::default());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(VidrankConfig::from_toml("").unwrap(), VidrankConfig::default());
    }

    #[test]
    fn toml_roundtrip() {
        let config = VidrankConfig::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("[scoring]"));
        assert_eq!(VidrankConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn rejects_bad_values() {
        let err = VidrankConfig::from_toml("[scoring]\nscale = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = VidrankConfig::from_toml("[tiers]\nviral = 0.5\nexcellent = 0.4\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = VidrankConfig::from_toml("[render]\nmax_chars = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = VidrankConfig::from_toml("[scoring\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = VidrankConfig::load(&dir.path().join(CONFIG_FILE_NAME)).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[cache]\nttl_seconds = 5\n").unwrap();
        let config = VidrankConfig::load(&path).unwrap();
        assert_eq!(config.cache.ttl_seconds, 5);
        assert_eq!(VidrankConfig::load_or_default(None).unwrap(), VidrankConfig::default());
    }
}
