use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> std::io::Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(e.kind(), format!("Failed to open file {:?}: {}", path, e))
    })?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Split a header line into column names and look up the index of each required column.
///
pub fn column_indices(header: &str, required: &[&str]) -> Result<Vec<usize>, String> {
    let columns: Vec<&str> = header.trim_end().split('\t').collect();
    required
        .iter()
        .map(|name| {
            columns
                .iter()
                .position(|column| column == name)
                .ok_or_else(|| format!("missing column '{}'", name))
        })
        .collect()
}
