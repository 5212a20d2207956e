use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CV_FOLDS, DEFAULT_NSIM, DEFAULT_WINDOW_SIZE};
use crate::errors::{FlankFoldError, Result};
use crate::models::WindowGeometry;

///
/// Scalar parameters of one enrichment analysis.
///
/// Every field has a default so a TOML file only needs to set what differs.
/// Command line flags are applied on top of the loaded values.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Positions covered by the feature itself (e.g. 19 for a CTCF motif)
    pub feature_size: Option<usize>,
    /// Feature plus both flanks
    pub window_size: usize,
    /// Number of Monte Carlo simulations
    pub nsim: usize,
    /// Seed for the simulation generator; entropy-seeded when absent
    pub seed: Option<u64>,
    /// Mutational signature the analysis is restricted to
    pub signature: Option<String>,
    /// Worker threads; rayon decides when absent
    pub threads: Option<usize>,
    /// Folds used to score bandwidth candidates
    pub cv_folds: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            feature_size: None,
            window_size: DEFAULT_WINDOW_SIZE,
            nsim: DEFAULT_NSIM,
            seed: None,
            signature: None,
            threads: None,
            cv_folds: DEFAULT_CV_FOLDS,
        }
    }
}

impl AnalysisConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            FlankFoldError::InvalidConfig(format!("{}: {}", path.display(), e))
        })?;
        Ok(config)
    }

    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FlankFoldError::InvalidConfig(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    ///
    /// Check the scalar parameters and derive the window geometry.
    ///
    pub fn validate(&self) -> Result<WindowGeometry> {
        if self.nsim == 0 {
            return Err(FlankFoldError::NoSimulations);
        }
        if self.cv_folds < 2 {
            return Err(FlankFoldError::InvalidConfig(format!(
                "cv_folds must be at least 2, got {}",
                self.cv_folds
            )));
        }
        if self.threads == Some(0) {
            return Err(FlankFoldError::InvalidConfig(
                "threads must be at least 1".to_string(),
            ));
        }
        let feature_size = self
            .feature_size
            .ok_or_else(|| FlankFoldError::InvalidConfig("feature_size is required".to_string()))?;

        WindowGeometry::new(self.window_size, feature_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use tempfile::tempdir;

    #[rstest]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.window_size, 2000);
        assert_eq!(config.nsim, 1000);
        assert_eq!(config.cv_folds, 5);
    }

    #[rstest]
    fn test_partial_toml_uses_defaults() {
        let tempdir = tempdir().unwrap();
        let path = tempdir.path().join("analysis.toml");
        std::fs::write(&path, "feature_size = 50\nnsim = 200\nseed = 7\n").unwrap();

        let config = AnalysisConfig::from_file(&path).unwrap();
        assert_eq!(config.feature_size, Some(50));
        assert_eq!(config.nsim, 200);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.window_size, 2000);

        let geometry = config.validate().unwrap();
        assert_eq!(geometry.flank_size, 975);
    }

    #[rstest]
    fn test_to_file_round_trip() {
        let tempdir = tempdir().unwrap();
        let path = tempdir.path().join("analysis.toml");
        let config = AnalysisConfig {
            feature_size: Some(20),
            signature: Some("SBS1".to_string()),
            ..Default::default()
        };
        config.to_file(&path).unwrap();
        assert_eq!(AnalysisConfig::from_file(&path).unwrap(), config);
    }

    #[rstest]
    fn test_zero_simulations_rejected() {
        let config = AnalysisConfig {
            feature_size: Some(50),
            nsim: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[rstest]
    fn test_missing_feature_size_rejected() {
        assert!(AnalysisConfig::default().validate().is_err());
    }
}
