use std::collections::{BTreeMap, BTreeSet};

use crate::errors::{FlankFoldError, Result};
use crate::models::PositionCountProfile;

///
/// One mutation that fell inside a feature window.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedHit {
    pub feature_id: String,
    pub relative_position: usize,
    pub signature: Option<String>,
}

///
/// Number of observed mutations in one feature window.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureMutations {
    pub feature_id: String,
    pub mutations: usize,
}

///
/// Table of mutations intersected with feature windows, the observed side of the test.
///
#[derive(Debug, Clone, Default)]
pub struct ObservedHits {
    hits: Vec<ObservedHit>,
}

impl ObservedHits {
    pub fn from_rows(hits: Vec<ObservedHit>) -> Self {
        ObservedHits { hits }
    }

    ///
    /// Keep only the hits attributed to one mutational signature.
    ///
    pub fn for_signature(&self, signature: &str) -> ObservedHits {
        let hits = self
            .hits
            .iter()
            .filter(|hit| hit.signature.as_deref() == Some(signature))
            .cloned()
            .collect();
        ObservedHits { hits }
    }

    pub fn hits(&self) -> &[ObservedHit] {
        &self.hits
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    ///
    /// Observed mutation counts per relative position, across all features.
    ///
    pub fn profile(&self, window_size: usize) -> Result<PositionCountProfile> {
        if let Some(hit) = self
            .hits
            .iter()
            .find(|hit| hit.relative_position >= window_size)
        {
            return Err(FlankFoldError::PositionOutOfWindow {
                feature_id: hit.feature_id.clone(),
                position: hit.relative_position,
                window_size,
            });
        }
        PositionCountProfile::from_positions(
            self.hits.iter().map(|hit| hit.relative_position),
            window_size,
        )
    }

    ///
    /// Mutations per feature, ordered by feature identifier.
    ///
    pub fn mutations_per_feature(&self) -> Vec<FeatureMutations> {
        let mut per_feature: BTreeMap<&str, usize> = BTreeMap::new();
        for hit in &self.hits {
            *per_feature.entry(hit.feature_id.as_str()).or_default() += 1;
        }
        per_feature
            .into_iter()
            .map(|(feature_id, mutations)| FeatureMutations {
                feature_id: feature_id.to_string(),
                mutations,
            })
            .collect()
    }

    /// Number of distinct features with at least one hit.
    pub fn total_features(&self) -> usize {
        self.hits
            .iter()
            .map(|hit| hit.feature_id.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }
}
