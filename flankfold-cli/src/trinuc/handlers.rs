use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use flankfold_core::io::read_signature_table;
use flankfold_stats::TrinucleotideProbabilityMap;

use crate::output::write_json;

pub fn run_trinuc(matches: &ArgMatches) -> Result<()> {
    let signatures_path = matches
        .get_one::<String>("signatures")
        .expect("--signatures is required");
    let signature = matches
        .get_one::<String>("signature")
        .expect("--signature is required");
    let output_path = matches.get_one::<String>("output");

    let table = read_signature_table(Path::new(signatures_path))
        .with_context(|| format!("Failed to load signature table: {}", signatures_path))?;
    let probabilities = TrinucleotideProbabilityMap::from_signature_table(&table, signature)?;
    info!(
        "{} trinucleotide contexts for {}",
        probabilities.len(),
        signature
    );

    let value = serde_json::to_value(probabilities.to_sorted_map())
        .context("Failed to serialize propensities")?;
    write_json(&value, output_path)?;

    Ok(())
}
