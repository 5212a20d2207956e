use std::io::BufRead;
use std::path::Path;

use log::debug;

use crate::consts::{ID_COLUMN, POS_COLUMN, REL_POS_COLUMN, SIGNATURE_COLUMN};
use crate::errors::{FlankFoldError, Result};
use crate::models::{FeatureWindow, ObservedHit, ObservedHits};
use crate::utils::{column_indices, get_dynamic_reader};

///
/// Read the table of mutations intersected with feature windows.
///
/// The header must contain `ID` and either `POS_REL_START` or `POS`; without
/// `POS_REL_START` the relative position is derived from the window
/// coordinates encoded in the feature id. `SIGNATURE` is read when present.
///
/// # Arguments
///
/// - path: path to the (optionally gzipped) TSV file
///
pub fn read_observed_hits(path: &Path) -> Result<ObservedHits> {
    let reader = get_dynamic_reader(path)?;
    let file = path.display().to_string();
    let parse_error = |message: String| FlankFoldError::ParseError {
        file: file.clone(),
        message,
    };

    let mut lines = reader.lines();
    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(FlankFoldError::EmptyObservations(file.clone())),
    };

    let id_idx = column_indices(&header, &[ID_COLUMN]).map_err(parse_error)?[0];
    let rel_idx = column_indices(&header, &[REL_POS_COLUMN]).ok().map(|v| v[0]);
    let pos_idx = column_indices(&header, &[POS_COLUMN]).ok().map(|v| v[0]);
    if rel_idx.is_none() && pos_idx.is_none() {
        return Err(parse_error(format!(
            "missing column: {} or {}",
            REL_POS_COLUMN, POS_COLUMN
        )));
    }
    let sig_idx = column_indices(&header, &[SIGNATURE_COLUMN]).ok().map(|v| v[0]);

    let mut hits = Vec::new();
    for (line_number, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.trim_end().split('\t').collect();
        let field = |idx: usize| {
            fields.get(idx).copied().ok_or_else(|| {
                parse_error(format!("line {}: missing field {}", line_number + 2, idx))
            })
        };

        let feature_id = field(id_idx)?;
        let position = match pos_idx {
            Some(idx) => Some(field(idx)?.parse::<u64>().map_err(|e| {
                parse_error(format!("line {}: bad {}: {}", line_number + 2, POS_COLUMN, e))
            })?),
            None => None,
        };
        let relative_position = match (rel_idx, position) {
            (Some(idx), _) => field(idx)?.parse::<usize>().map_err(|e| {
                parse_error(format!("line {}: bad {}: {}", line_number + 2, REL_POS_COLUMN, e))
            })?,
            (None, Some(pos)) => FeatureWindow::parse(feature_id)?
                .relative_position(pos)
                .ok_or_else(|| {
                    parse_error(format!(
                        "line {}: {} {} is outside window {}",
                        line_number + 2,
                        POS_COLUMN,
                        pos,
                        feature_id
                    ))
                })?,
            (None, None) => unreachable!("checked against the header"),
        };
        let signature = match sig_idx {
            Some(idx) => Some(field(idx)?.to_string()),
            None => None,
        };

        hits.push(ObservedHit {
            feature_id: feature_id.to_string(),
            relative_position,
            signature,
        });
    }

    debug!("Read {} observed hits from {}", hits.len(), file);

    Ok(ObservedHits::from_rows(hits))
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use tempfile::tempdir;

    #[rstest]
    fn test_read_observed_hits() {
        let tempdir = tempdir().unwrap();
        let path = tempdir.path().join("hits.tsv");
        std::fs::write(
            &path,
            "ID\tPOS\tPOS_REL_START\tSIGNATURE\n\
             a__chr1:10-19\t14\t4\tSBS1\n\
             a__chr1:10-19\t19\t9\tSBS5\n",
        )
        .unwrap();

        let hits = read_observed_hits(&path).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits.hits()[0].relative_position, 4);
        assert_eq!(hits.hits()[1].signature.as_deref(), Some("SBS5"));
    }

    #[rstest]
    fn test_trailing_whitespace_and_crlf() {
        let tempdir = tempdir().unwrap();
        let path = tempdir.path().join("hits.tsv");
        std::fs::write(
            &path,
            "ID\tPOS_REL_START\tSIGNATURE\r\na__chr1:10-19\t4\tSBS1 \r\nb__chr1:20-29\t5\tSBS1\r\n",
        )
        .unwrap();

        let hits = read_observed_hits(&path).unwrap();
        assert_eq!(hits.hits()[0].signature.as_deref(), Some("SBS1"));
        assert_eq!(hits.for_signature("SBS1").len(), 2);
    }

    #[rstest]
    fn test_optional_columns() {
        let tempdir = tempdir().unwrap();
        let path = tempdir.path().join("hits.tsv");
        std::fs::write(&path, "POS_REL_START\tID\n3\tb__chr2:0-9\n").unwrap();

        let hits = read_observed_hits(&path).unwrap();
        assert_eq!(hits.hits()[0].feature_id, "b__chr2:0-9");
        assert_eq!(hits.hits()[0].signature, None);
    }

    #[rstest]
    fn test_relative_position_from_feature_id() {
        let tempdir = tempdir().unwrap();
        let path = tempdir.path().join("hits.tsv");
        std::fs::write(&path, "ID\tPOS\nCTCF_7__chr3:1000-1039\t1012\n").unwrap();

        let hits = read_observed_hits(&path).unwrap();
        assert_eq!(hits.hits()[0].relative_position, 12);
    }

    #[rstest]
    #[case("ID\tPOS\nCTCF_7__chr3:1000-1039\t999\n")]
    #[case("ID\tPOS\nnot_a_window\t1012\n")]
    #[case("ID\tSIGNATURE\nCTCF_7__chr3:1000-1039\tSBS1\n")]
    fn test_unresolvable_position_rejected(#[case] content: &str) {
        let tempdir = tempdir().unwrap();
        let path = tempdir.path().join("hits.tsv");
        std::fs::write(&path, content).unwrap();
        assert!(read_observed_hits(&path).is_err());
    }

    #[rstest]
    fn test_bad_position_is_parse_error() {
        let tempdir = tempdir().unwrap();
        let path = tempdir.path().join("hits.tsv");
        std::fs::write(&path, "ID\tPOS_REL_START\na\t-1\n").unwrap();
        assert!(matches!(
            read_observed_hits(&path),
            Err(FlankFoldError::ParseError { .. })
        ));
    }
}
