use std::io::BufRead;
use std::path::Path;

use log::debug;

use crate::consts::MUTATION_TYPE_COLUMN;
use crate::errors::{FlankFoldError, Result};
use crate::models::SignatureTable;
use crate::utils::{column_indices, get_dynamic_reader};

///
/// Read an SBS96 signature matrix: a `Type` column plus one column per signature.
///
pub fn read_signature_table(path: &Path) -> Result<SignatureTable> {
    let reader = get_dynamic_reader(path)?;
    let file = path.display().to_string();
    let parse_error = |message: String| FlankFoldError::ParseError {
        file: file.clone(),
        message,
    };

    let mut lines = reader.lines();
    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(parse_error("empty signature table".to_string())),
    };
    let type_idx = column_indices(&header, &[MUTATION_TYPE_COLUMN]).map_err(parse_error)?[0];

    let columns: Vec<&str> = header.trim_end().split('\t').collect();
    let signature_columns: Vec<usize> = (0..columns.len()).filter(|&i| i != type_idx).collect();
    let signatures: Vec<String> = signature_columns
        .iter()
        .map(|&i| columns[i].to_string())
        .collect();

    let mut mutation_types = Vec::new();
    let mut probabilities = Vec::new();
    for (line_number, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.trim_end().split('\t').collect();
        if fields.len() != columns.len() {
            return Err(parse_error(format!(
                "line {}: expected {} fields, found {}",
                line_number + 2,
                columns.len(),
                fields.len()
            )));
        }

        let row = signature_columns
            .iter()
            .map(|&i| {
                fields[i].parse::<f64>().map_err(|e| {
                    parse_error(format!("line {}: bad probability: {}", line_number + 2, e))
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        mutation_types.push(fields[type_idx].to_string());
        probabilities.push(row);
    }

    debug!(
        "Read {} mutation types x {} signatures from {}",
        mutation_types.len(),
        signatures.len(),
        file
    );

    SignatureTable::new(mutation_types, signatures, probabilities)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use tempfile::tempdir;

    #[rstest]
    fn test_read_signature_table() {
        let tempdir = tempdir().unwrap();
        let path = tempdir.path().join("sbs96.tsv");
        std::fs::write(
            &path,
            "Type\tSBS1\tSBS5\nA[C>A]A\t0.01\t0.02\nA[C>G]A\t0.03\t0.04\n",
        )
        .unwrap();

        let table = read_signature_table(&path).unwrap();
        assert_eq!(table.signatures(), &["SBS1".to_string(), "SBS5".to_string()]);
        assert_eq!(
            table.column("SBS1").unwrap(),
            vec![("A[C>A]A", 0.01), ("A[C>G]A", 0.03)]
        );
    }

    #[rstest]
    fn test_missing_type_column() {
        let tempdir = tempdir().unwrap();
        let path = tempdir.path().join("sbs96.tsv");
        std::fs::write(&path, "MutationType\tSBS1\nA[C>A]A\t0.01\n").unwrap();
        assert!(read_signature_table(&path).is_err());
    }
}
