//! Engine configuration.
//!
//! All knobs the external UI can turn (similarity threshold, compared
//! dimension) plus the fixed tuning values of the glyph and fusion paths.
//!
//! # Example YAML
//!
//! ```yaml
//! similarity_threshold: 0.8
//! cluster_relaxation: 0.05
//! dimension: semantic
//! cosine_mode: exact
//! sampling_seed: 7
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::IsotypeError;
use crate::similarity::cosine::CosineMode;
use crate::subject::Dimension;

/// Tunable parameters for the isotype engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsotypeConfig {
    /// Minimum cosine similarity for an edge to be retained.
    pub similarity_threshold: f64,
    /// How far below `similarity_threshold` cluster detection may reach.
    pub cluster_relaxation: f64,
    /// Which feature vector edges compare.
    pub dimension: Dimension,
    /// Exact cosine similarity, or the stride-2 legacy shortcut.
    pub cosine_mode: CosineMode,
    /// Seed for the random fill of each subject's candidate sample.
    pub sampling_seed: u64,
    /// Octaves for the organic noise term of glyph outlines.
    pub noise_octaves: u32,
    /// Weight (relative to deformation) of the organic noise term.
    pub organic_noise: f64,
    /// Smallest glyph base size.
    pub base_size_min: f64,
    /// Largest glyph base size.
    pub base_size_max: f64,
    /// Text length at which the base size saturates.
    pub reference_text_length: usize,
    /// Base opacity of fusion gradient stops.
    pub fusion_base_opacity: f64,
}

impl Default for IsotypeConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.7,
            cluster_relaxation: 0.05,
            dimension: Dimension::Unified,
            cosine_mode: CosineMode::Exact,
            sampling_seed: 42,
            noise_octaves: 3,
            organic_noise: 0.3,
            base_size_min: 8.0,
            base_size_max: 16.0,
            reference_text_length: 2000,
            fusion_base_opacity: 1.0,
        }
    }
}

impl IsotypeConfig {
    /// Parse and validate a config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, IsotypeError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a config from a YAML file on disk.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, IsotypeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load from the file named by `ISOTYPE_CONFIG`, or fall back to defaults.
    pub fn from_env() -> Result<Self, IsotypeError> {
        match std::env::var("ISOTYPE_CONFIG") {
            Ok(path) if !path.is_empty() => {
                tracing::info!("Loading isotype config from {}", path);
                Self::from_yaml_file(path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Threshold used by cluster detection.
    pub fn cluster_threshold(&self) -> f64 {
        (self.similarity_threshold - self.cluster_relaxation).max(0.0)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), IsotypeError> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(IsotypeError::InvalidConfig(format!(
                "similarity_threshold must be within [0, 1], got {}",
                self.similarity_threshold
            )));
        }
        if self.cluster_relaxation < 0.0 {
            return Err(IsotypeError::InvalidConfig(format!(
                "cluster_relaxation must be non-negative, got {}",
                self.cluster_relaxation
            )));
        }
        if self.noise_octaves == 0 {
            return Err(IsotypeError::InvalidConfig(
                "noise_octaves must be at least 1".to_string(),
            ));
        }
        if self.base_size_min <= 0.0 || self.base_size_max < self.base_size_min {
            return Err(IsotypeError::InvalidConfig(format!(
                "base size range [{}, {}] is invalid",
                self.base_size_min, self.base_size_max
            )));
        }
        if self.reference_text_length == 0 {
            return Err(IsotypeError::InvalidConfig(
                "reference_text_length must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = IsotypeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.dimension, Dimension::Unified);
        assert_eq!(config.cosine_mode, CosineMode::Exact);
        assert!((config.cluster_threshold() - 0.65).abs() < 1e-12);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
similarity_threshold: 0.8
dimension: semantic
cosine_mode: legacy_sampled
"#;
        let config = IsotypeConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.similarity_threshold, 0.8);
        assert_eq!(config.dimension, Dimension::Semantic);
        assert_eq!(config.cosine_mode, CosineMode::LegacySampled);
        assert_eq!(config.sampling_seed, 42);
        assert_eq!(config.noise_octaves, 3);
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let err = IsotypeConfig::from_yaml("similarity_threshold: 1.5").unwrap_err();
        assert!(matches!(err, IsotypeError::InvalidConfig(_)));
    }

    #[test]
    fn test_cluster_threshold_never_negative() {
        let config = IsotypeConfig {
            similarity_threshold: 0.02,
            cluster_relaxation: 0.05,
            ..Default::default()
        };
        assert_eq!(config.cluster_threshold(), 0.0);
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sampling_seed: 9\norganic_noise: 0.0").unwrap();
        let config = IsotypeConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.sampling_seed, 9);
        assert_eq!(config.organic_noise, 0.0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = IsotypeConfig::from_yaml_file("/nonexistent/isotype.yaml").unwrap_err();
        assert!(matches!(err, IsotypeError::Io(_)));
    }
}
