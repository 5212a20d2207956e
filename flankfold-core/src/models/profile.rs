use serde::Serialize;

use crate::errors::{FlankFoldError, Result};

///
/// Mutation counts per relative window position, aggregated across features.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PositionCountProfile {
    counts: Vec<u64>,
}

impl PositionCountProfile {
    pub fn zeros(window_size: usize) -> Self {
        PositionCountProfile {
            counts: vec![0; window_size],
        }
    }

    ///
    /// Count hits per position. Every position must fall inside the window.
    ///
    /// # Arguments
    ///
    /// - positions: relative positions of each hit, repeated for multiple hits
    /// - window_size: length of the resulting profile
    ///
    pub fn from_positions<I>(positions: I, window_size: usize) -> Result<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut profile = PositionCountProfile::zeros(window_size);
        for position in positions {
            profile.increment(position)?;
        }
        Ok(profile)
    }

    pub fn increment(&mut self, position: usize) -> Result<()> {
        let window_size = self.counts.len();
        let slot = self
            .counts
            .get_mut(position)
            .ok_or_else(|| FlankFoldError::PositionOutOfWindow {
                feature_id: "<profile>".to_string(),
                position,
                window_size,
            })?;
        *slot += 1;
        Ok(())
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn into_inner(self) -> Vec<u64> {
        self.counts
    }
}

impl From<Vec<u64>> for PositionCountProfile {
    fn from(counts: Vec<u64>) -> Self {
        PositionCountProfile { counts }
    }
}
