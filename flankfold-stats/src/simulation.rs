//! Monte Carlo null model of mutation placement inside feature windows.
//!
//! Each feature keeps its observed number of mutations but their positions are
//! redrawn, with replacement, proportionally to the trinucleotide propensity
//! of every window position. Draws of all features are summed per simulation
//! index, so every simulation yields one aggregated profile and one fold change.

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use ndarray::{Array2, Axis};
use rand::prelude::*;
use rand_distr::WeightedAliasIndex;
use rayon::prelude::*;

use flankfold_core::errors::{FlankFoldError, Result};
use flankfold_core::models::{FeatureMutations, PositionCountProfile, WindowGeometry};
use flankfold_core::sequence::SequenceSource;

use crate::fold_change::compute_fold_change;
use crate::trinucleotide::TrinucleotideProbabilityMap;

#[derive(Debug, Clone)]
pub struct SimulationOptions {
    /// Number of simulations
    pub nsim: usize,
    /// Show a progress bar over features
    pub progress: bool,
}

impl SimulationOptions {
    pub fn new(nsim: usize) -> Self {
        Self {
            nsim,
            progress: false,
        }
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }
}

///
/// Result of the simulations: one aggregated profile per simulation
/// (rows of `profiles`) and the fold change of each.
///
#[derive(Debug, Clone)]
pub struct NullSimulation {
    pub profiles: Array2<u64>,
    pub expected_fc: Vec<f64>,
    pub total_features: usize,
}

impl NullSimulation {
    ///
    /// Position-wise sum of all simulated profiles (not the mean).
    ///
    pub fn expected_muts(&self) -> PositionCountProfile {
        PositionCountProfile::from(self.profiles.sum_axis(Axis(0)).to_vec())
    }

    pub fn nsim(&self) -> usize {
        self.profiles.nrows()
    }
}

pub struct NullSimulator<'a> {
    geometry: WindowGeometry,
    probabilities: &'a TrinucleotideProbabilityMap,
    options: SimulationOptions,
}

impl<'a> NullSimulator<'a> {
    pub fn new(
        geometry: WindowGeometry,
        probabilities: &'a TrinucleotideProbabilityMap,
        options: SimulationOptions,
    ) -> Result<Self> {
        if options.nsim == 0 {
            return Err(FlankFoldError::NoSimulations);
        }
        Ok(Self {
            geometry,
            probabilities,
            options,
        })
    }

    ///
    /// Normalised sampling weights of every window position of one feature.
    ///
    pub fn position_probabilities<S: SequenceSource>(
        &self,
        feature_id: &str,
        sequences: &S,
    ) -> Result<Vec<f64>> {
        let sequence = sequences.window_sequence(feature_id)?;
        let expected = self.geometry.window_size + 2;
        if sequence.len() != expected {
            return Err(FlankFoldError::SequenceLength {
                feature_id: feature_id.to_string(),
                expected,
                found: sequence.len(),
            });
        }

        let weights = self
            .probabilities
            .position_weights(sequence, self.geometry.window_size);
        let total: f64 = weights.iter().sum();
        if total == 0.0 {
            return Err(FlankFoldError::UnrepresentableContexts(
                feature_id.to_string(),
            ));
        }

        let factor = 1.0 / total;
        Ok(weights.into_iter().map(|w| w * factor).collect())
    }

    ///
    /// Draw every simulation for one feature and add its hits to `accumulator`.
    ///
    fn simulate_feature<S: SequenceSource>(
        &self,
        feature: &FeatureMutations,
        sequences: &S,
        seed: u64,
        accumulator: &mut Array2<u64>,
    ) -> Result<()> {
        let probabilities = self.position_probabilities(&feature.feature_id, sequences)?;
        if feature.mutations == 0 {
            return Ok(());
        }

        let sampler = WeightedAliasIndex::new(probabilities).map_err(|e| {
            FlankFoldError::InvalidWeights {
                feature_id: feature.feature_id.clone(),
                message: e.to_string(),
            }
        })?;

        let mut rng = StdRng::seed_from_u64(seed);
        for mut profile in accumulator.rows_mut() {
            for _ in 0..feature.mutations {
                profile[sampler.sample(&mut rng)] += 1;
            }
        }

        Ok(())
    }

    ///
    /// Simulate every feature and reduce each simulation to a fold change.
    ///
    /// One seed per feature is drawn from `rng` in input order before any
    /// work is spread over threads, so a seeded `rng` gives identical results
    /// regardless of the number of threads.
    ///
    /// # Arguments
    ///
    /// - features: observed mutation count of each feature
    /// - sequences: window sequences (`window_size + 2` bases) keyed by feature id
    /// - rng: generator the per-feature seeds are drawn from
    ///
    pub fn simulate<S, R>(
        &self,
        features: &[FeatureMutations],
        sequences: &S,
        rng: &mut R,
    ) -> Result<NullSimulation>
    where
        S: SequenceSource + Sync,
        R: Rng,
    {
        if features.is_empty() {
            return Err(FlankFoldError::EmptyObservations(
                "no features to simulate".to_string(),
            ));
        }

        let nsim = self.options.nsim;
        let window_size = self.geometry.window_size;
        let seeds: Vec<u64> = features.iter().map(|_| rng.r#gen::<u64>()).collect();

        info!(
            "Simulating {} features x {} simulations over {} positions",
            features.len(),
            nsim,
            window_size
        );

        let pb = if self.options.progress {
            let pb = ProgressBar::new(features.len() as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} features simulated")
            {
                pb.set_style(style);
            }
            pb
        } else {
            ProgressBar::hidden()
        };

        // one accumulator per worker thread; each is nsim x window_size
        let chunk_size = features.len().div_ceil(rayon::current_num_threads());
        let profiles = features
            .par_chunks(chunk_size)
            .zip(seeds.par_chunks(chunk_size))
            .map(|(chunk, chunk_seeds)| {
                let mut accumulator = Array2::<u64>::zeros((nsim, window_size));
                for (feature, &seed) in chunk.iter().zip(chunk_seeds) {
                    self.simulate_feature(feature, sequences, seed, &mut accumulator)?;
                    pb.inc(1);
                }
                Ok::<_, FlankFoldError>(accumulator)
            })
            .try_reduce_with(|a, b| Ok(a + b))
            .unwrap_or_else(|| Ok(Array2::<u64>::zeros((nsim, window_size))))?;

        pb.finish_and_clear();

        let total_features = features.len();
        let expected_fc = profiles
            .rows()
            .into_iter()
            .map(|profile| {
                compute_fold_change(
                    &profile.to_vec(),
                    self.geometry.feature_size,
                    self.geometry.flank_size,
                    total_features,
                )
            })
            .collect::<Result<Vec<f64>>>()?;

        debug!("Computed {} simulated fold changes", expected_fc.len());

        Ok(NullSimulation {
            profiles,
            expected_fc,
            total_features,
        })
    }
}
