use crate::errors::{FlankFoldError, Result};

///
/// SBS96 mutational signature matrix: one row per mutation type in `A[C>A]A`
/// notation, one column per signature.
///
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureTable {
    mutation_types: Vec<String>,
    signatures: Vec<String>,
    probabilities: Vec<Vec<f64>>,
}

impl SignatureTable {
    pub fn new(
        mutation_types: Vec<String>,
        signatures: Vec<String>,
        probabilities: Vec<Vec<f64>>,
    ) -> Result<Self> {
        if mutation_types.len() != probabilities.len() {
            return Err(FlankFoldError::ParseError {
                file: "<signature table>".to_string(),
                message: format!(
                    "{} mutation types but {} probability rows",
                    mutation_types.len(),
                    probabilities.len()
                ),
            });
        }
        if let Some((i, row)) = probabilities
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != signatures.len())
        {
            return Err(FlankFoldError::ParseError {
                file: "<signature table>".to_string(),
                message: format!(
                    "row {} has {} values, expected {}",
                    i,
                    row.len(),
                    signatures.len()
                ),
            });
        }

        Ok(SignatureTable {
            mutation_types,
            signatures,
            probabilities,
        })
    }

    pub fn signatures(&self) -> &[String] {
        &self.signatures
    }

    ///
    /// Probabilities of one signature, paired with their mutation type.
    ///
    pub fn column(&self, signature: &str) -> Result<Vec<(&str, f64)>> {
        let index = self
            .signatures
            .iter()
            .position(|name| name == signature)
            .ok_or_else(|| FlankFoldError::UnknownSignature(signature.to_string()))?;

        Ok(self
            .mutation_types
            .iter()
            .zip(&self.probabilities)
            .map(|(mutation_type, row)| (mutation_type.as_str(), row[index]))
            .collect())
    }
}

///
/// Reference trinucleotide of an SBS96 mutation type: `A[C>T]G` -> `ACG`.
///
pub fn reference_trinucleotide(mutation_type: &str) -> Option<String> {
    let bytes = mutation_type.as_bytes();
    if bytes.len() < 7 || bytes[1] != b'[' || bytes[5] != b']' {
        return None;
    }
    let trinucleotide = [bytes[0], bytes[2], bytes[bytes.len() - 1]];
    String::from_utf8(trinucleotide.to_vec()).ok()
}
