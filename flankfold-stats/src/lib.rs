//! Monte Carlo enrichment test of mutation density in genomic features.
//!
//! The test compares the mutation density inside a feature with the density
//! in its flanks:
//!
//! - [`fold_change`] reduces a per-position count profile to one ratio
//! - [`trinucleotide`] turns an SBS96 signature into per-context propensities
//! - [`simulation`] redraws mutation positions under those propensities
//! - [`density`] fits a kernel density to the simulated ratios and returns a p-value
//! - [`analysis`] chains the steps into the output record
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use flankfold_core::io::{read_observed_hits, read_signature_table, read_window_sequences};
//! use flankfold_core::models::AnalysisConfig;
//! use flankfold_stats::{TrinucleotideProbabilityMap, run_analysis};
//!
//! let config = AnalysisConfig {
//!     feature_size: Some(50),
//!     signature: Some("SBS1".to_string()),
//!     seed: Some(42),
//!     ..Default::default()
//! };
//! let hits = read_observed_hits(Path::new("hits.tsv.gz"))?;
//! let table = read_signature_table(Path::new("sbs96.tsv"))?;
//! let probabilities = TrinucleotideProbabilityMap::from_signature_table(&table, "SBS1")?;
//! let sequences = read_window_sequences(Path::new("windows.fa.gz"))?;
//!
//! let result = run_analysis(&config, &hits, &probabilities, &sequences, false)?;
//! println!("fold change {} p = {}", result.observed_fc, result.pval);
//! # Ok::<(), flankfold_core::FlankFoldError>(())
//! ```

pub mod analysis;
pub mod consts;
pub mod density;
pub mod fold_change;
pub mod simulation;
pub mod trinucleotide;

// re-exports
pub use analysis::{AnalysisResult, run_analysis};
pub use density::{DensityPvalueEstimator, FittedDensity};
pub use fold_change::compute_fold_change;
pub use simulation::{NullSimulation, NullSimulator, SimulationOptions};
pub use trinucleotide::{TrinucleotideProbabilityMap, reverse_complement};
