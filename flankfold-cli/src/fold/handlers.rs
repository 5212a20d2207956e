use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use flankfold_core::io::{read_observed_hits, read_signature_table, read_window_sequences};
use flankfold_core::models::AnalysisConfig;
use flankfold_stats::{TrinucleotideProbabilityMap, run_analysis};

use crate::output::write_json;

/// Load the config file, if any, and apply the command line flags on top.
fn resolve_config(matches: &ArgMatches) -> Result<AnalysisConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => AnalysisConfig::from_file(Path::new(path))
            .with_context(|| format!("Failed to load config file: {}", path))?,
        None => AnalysisConfig::default(),
    };

    if let Some(signature) = matches.get_one::<String>("signature") {
        config.signature = Some(signature.clone());
    }
    if let Some(&feature_size) = matches.get_one::<usize>("feature-size") {
        config.feature_size = Some(feature_size);
    }
    if let Some(&window_size) = matches.get_one::<usize>("window-size") {
        config.window_size = window_size;
    }
    if let Some(&nsim) = matches.get_one::<usize>("nsim") {
        config.nsim = nsim;
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config.seed = Some(seed);
    }
    if let Some(&threads) = matches.get_one::<usize>("threads") {
        config.threads = Some(threads);
    }
    if let Some(&cv_folds) = matches.get_one::<usize>("cv-folds") {
        config.cv_folds = cv_folds;
    }

    Ok(config)
}

pub fn run_fold(matches: &ArgMatches) -> Result<()> {
    let hits_path = matches
        .get_one::<String>("hits")
        .expect("--hits is required");
    let signatures_path = matches
        .get_one::<String>("signatures")
        .expect("--signatures is required");
    let sequences_path = matches
        .get_one::<String>("sequences")
        .expect("--sequences is required");
    let output_path = matches.get_one::<String>("output");
    let progress = matches.get_flag("progress");

    let config = resolve_config(matches)?;
    config.validate()?;
    let signature = config
        .signature
        .clone()
        .ok_or_else(|| anyhow::anyhow!("A signature is required (--signature or config file)"))?;

    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    // inputs
    let hits = read_observed_hits(Path::new(hits_path))
        .with_context(|| format!("Failed to load hits: {}", hits_path))?;
    let table = read_signature_table(Path::new(signatures_path))
        .with_context(|| format!("Failed to load signature table: {}", signatures_path))?;
    let probabilities = TrinucleotideProbabilityMap::from_signature_table(&table, &signature)?;
    let sequences = read_window_sequences(Path::new(sequences_path))
        .with_context(|| format!("Failed to load window sequences: {}", sequences_path))?;
    info!(
        "Loaded {} hits, {} signatures and {} window sequences",
        hits.len(),
        table.signatures().len(),
        sequences.len()
    );

    let result = run_analysis(&config, &hits, &probabilities, &sequences, progress)?;

    let value = serde_json::to_value(&result).context("Failed to serialize result")?;
    write_json(&value, output_path)?;

    Ok(())
}
