use std::collections::HashMap;

use crate::errors::{FlankFoldError, Result};

///
/// Provider of the reference sequence spanning a feature window plus one
/// base on each side, so every window position has a full trinucleotide context.
///
pub trait SequenceSource {
    fn window_sequence(&self, feature_id: &str) -> Result<&str>;
}

impl SequenceSource for HashMap<String, String> {
    fn window_sequence(&self, feature_id: &str) -> Result<&str> {
        self.get(feature_id)
            .map(String::as_str)
            .ok_or_else(|| FlankFoldError::MissingSequence(feature_id.to_string()))
    }
}

///
/// In-memory window sequences keyed by feature identifier.
///
#[derive(Debug, Clone, Default)]
pub struct WindowSequences {
    sequences: HashMap<String, String>,
}

impl WindowSequences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, feature_id: String, sequence: String) {
        self.sequences.insert(feature_id, sequence.to_ascii_uppercase());
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

impl From<HashMap<String, String>> for WindowSequences {
    fn from(sequences: HashMap<String, String>) -> Self {
        let mut windows = WindowSequences::new();
        for (feature_id, sequence) in sequences {
            windows.insert(feature_id, sequence);
        }
        windows
    }
}

impl SequenceSource for WindowSequences {
    fn window_sequence(&self, feature_id: &str) -> Result<&str> {
        self.sequences.window_sequence(feature_id)
    }
}
