use log::info;
use rand::prelude::*;
use serde::Serialize;

use flankfold_core::errors::{FlankFoldError, Result};
use flankfold_core::models::{AnalysisConfig, ObservedHits};
use flankfold_core::sequence::SequenceSource;

use crate::density::DensityPvalueEstimator;
use crate::fold_change::compute_fold_change;
use crate::simulation::{NullSimulator, SimulationOptions};
use crate::trinucleotide::TrinucleotideProbabilityMap;

///
/// Outcome of one enrichment test, serialised as the output record.
///
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub observed_fc: f64,
    pub expected_fc: Vec<f64>,
    pub pval: f64,
    /// Simulated mutations per window position, summed over all simulations
    pub expected_muts: Vec<u64>,
}

///
/// Run the full test: observed fold change, null simulations and p-value.
///
/// When the configuration names a signature, only hits attributed to that
/// signature are used. Nothing is returned unless every step succeeds.
///
/// # Arguments
///
/// - config: scalar parameters; `seed` makes the run reproducible
/// - hits: mutations intersected with the feature windows
/// - probabilities: trinucleotide propensities of the signature under test
/// - sequences: window sequences keyed by feature id
/// - progress: show a progress bar during the simulations
///
pub fn run_analysis<S>(
    config: &AnalysisConfig,
    hits: &ObservedHits,
    probabilities: &TrinucleotideProbabilityMap,
    sequences: &S,
    progress: bool,
) -> Result<AnalysisResult>
where
    S: SequenceSource + Sync,
{
    let geometry = config.validate()?;

    let hits = match &config.signature {
        Some(signature) => hits.for_signature(signature),
        None => hits.clone(),
    };
    if hits.is_empty() {
        return Err(FlankFoldError::EmptyObservations(format!(
            "no hits for signature {}",
            config.signature.as_deref().unwrap_or("<any>")
        )));
    }

    // observed
    let observed = hits.profile(geometry.window_size)?;
    let total_features = hits.total_features();
    let observed_fc = compute_fold_change(
        observed.counts(),
        geometry.feature_size,
        geometry.flank_size,
        total_features,
    )?;
    info!(
        "Observed fold change {:.4} over {} mutations in {} features",
        observed_fc,
        observed.total(),
        total_features
    );

    // expected
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let simulator = NullSimulator::new(
        geometry,
        probabilities,
        SimulationOptions::new(config.nsim).with_progress(progress),
    )?;
    let simulation = simulator.simulate(&hits.mutations_per_feature(), sequences, &mut rng)?;

    // significance
    let density = DensityPvalueEstimator::new()
        .with_cv_folds(config.cv_folds)
        .fit(&simulation.expected_fc)?;
    let pval = density.p_value(observed_fc)?;
    info!(
        "p-value {:e} (bandwidth {:.3}, {} simulations)",
        pval,
        density.bandwidth(),
        simulation.nsim()
    );

    Ok(AnalysisResult {
        observed_fc,
        expected_muts: simulation.expected_muts().into_inner(),
        expected_fc: simulation.expected_fc,
        pval,
    })
}
