use serde::{Deserialize, Serialize};

use crate::errors::{FlankFoldError, Result};

///
/// Layout of the analysis window shared by every feature of one analysis:
/// `flank_5 | feature | flank_3`, with `feature_size + 2 * flank_size == window_size`.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub window_size: usize,
    pub feature_size: usize,
    pub flank_size: usize,
}

impl WindowGeometry {
    ///
    /// Derive the flank size from the window and feature sizes.
    ///
    /// # Arguments
    ///
    /// - window_size: total positions analysed per feature
    /// - feature_size: positions covered by the feature itself
    ///
    pub fn new(window_size: usize, feature_size: usize) -> Result<Self> {
        if window_size == 0 {
            return Err(FlankFoldError::EmptyRegion("window size is 0".to_string()));
        }
        if feature_size == 0 {
            return Err(FlankFoldError::EmptyRegion("feature size is 0".to_string()));
        }
        if feature_size > window_size {
            return Err(FlankFoldError::FeatureLargerThanWindow {
                window_size,
                feature_size,
            });
        }

        let remainder = window_size - feature_size;
        if remainder % 2 != 0 {
            return Err(FlankFoldError::UnevenFlanks {
                window_size,
                feature_size,
            });
        }

        let flank_size = remainder / 2;
        if flank_size == 0 {
            return Err(FlankFoldError::EmptyRegion("flank size is 0".to_string()));
        }

        Ok(WindowGeometry {
            window_size,
            feature_size,
            flank_size,
        })
    }

    ///
    /// Build a geometry from explicit feature and flank sizes.
    ///
    pub fn from_sizes(feature_size: usize, flank_size: usize) -> Result<Self> {
        WindowGeometry::new(feature_size + 2 * flank_size, feature_size)
    }

    /// Start of the feature, i.e. the first position past the 5' flank.
    pub fn feature_start(&self) -> usize {
        self.flank_size
    }

    /// One past the last feature position, i.e. the first 3' flank position.
    pub fn feature_end(&self) -> usize {
        self.flank_size + self.feature_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_ctcf_geometry() {
        let geometry = WindowGeometry::new(2000, 50).unwrap();
        assert_eq!(geometry.flank_size, 975);
        assert_eq!(geometry.feature_start(), 975);
        assert_eq!(geometry.feature_end(), 1025);
    }

    #[rstest]
    fn test_from_sizes_round_trips_window() {
        let geometry = WindowGeometry::from_sizes(19, 10).unwrap();
        assert_eq!(geometry.window_size, 39);
    }

    #[rstest]
    #[case(2000, 51)]
    #[case(2000, 0)]
    #[case(0, 0)]
    #[case(50, 50)]
    #[case(50, 60)]
    fn test_invalid_geometry_is_configuration_error(
        #[case] window_size: usize,
        #[case] feature_size: usize,
    ) {
        let err = WindowGeometry::new(window_size, feature_size).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
