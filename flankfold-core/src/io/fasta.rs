use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use log::debug;

use crate::errors::{FlankFoldError, Result};
use crate::sequence::WindowSequences;
use crate::utils::get_dynamic_reader;

///
/// Read pre-extracted window sequences. The record id (first word of the
/// header) must be the feature identifier; sequences are upper-cased.
///
pub fn read_window_sequences(path: &Path) -> Result<WindowSequences> {
    let reader = get_dynamic_reader(path)?;

    let mut sequences: HashMap<String, String> = HashMap::new();
    let mut current: Option<(String, String)> = None;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end();
        if let Some(header) = line.strip_prefix('>') {
            if let Some((id, seq)) = current.take() {
                sequences.insert(id, seq);
            }
            let id = header.split_whitespace().next().unwrap_or_default();
            if id.is_empty() {
                return Err(FlankFoldError::ParseError {
                    file: path.display().to_string(),
                    message: "FASTA record without identifier".to_string(),
                });
            }
            current = Some((id.to_string(), String::new()));
        } else if let Some((_, seq)) = current.as_mut() {
            seq.push_str(&line.to_ascii_uppercase());
        } else if !line.is_empty() {
            return Err(FlankFoldError::ParseError {
                file: path.display().to_string(),
                message: "sequence data before the first header".to_string(),
            });
        }
    }
    if let Some((id, seq)) = current.take() {
        sequences.insert(id, seq);
    }

    debug!("Read {} window sequences from {}", sequences.len(), path.display());

    Ok(WindowSequences::from(sequences))
}
