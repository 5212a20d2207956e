//! Bandwidth selection by cross-validated likelihood.
//!
//! Candidates are scored with a Gaussian kernel density whose standard
//! deviation is the candidate itself: the sample is split into contiguous
//! folds, each fold is scored by its log-likelihood under the density of the
//! remaining folds, and the mean over folds is the candidate's score.

use std::f64::consts::PI;

use log::debug;
use rayon::prelude::*;

use flankfold_core::errors::{FlankFoldError, Result};

use crate::consts::{BANDWIDTH_GRID_MAX, BANDWIDTH_GRID_MIN, BANDWIDTH_GRID_POINTS};

///
/// Log-spaced bandwidth candidates, both ends included.
///
pub fn bandwidth_grid() -> Vec<f64> {
    let (lo, hi) = (BANDWIDTH_GRID_MIN.log10(), BANDWIDTH_GRID_MAX.log10());
    let steps = (BANDWIDTH_GRID_POINTS - 1) as f64;
    (0..BANDWIDTH_GRID_POINTS)
        .map(|i| 10f64.powf(lo + (hi - lo) * i as f64 / steps))
        .collect()
}

///
/// Contiguous test folds: the first `n % folds` folds hold one extra sample.
///
fn fold_bounds(n: usize, folds: usize) -> Vec<(usize, usize)> {
    let base = n / folds;
    let extra = n % folds;
    let mut bounds = Vec::with_capacity(folds);
    let mut start = 0;
    for fold in 0..folds {
        let size = base + usize::from(fold < extra);
        bounds.push((start, start + size));
        start += size;
    }
    bounds
}

///
/// Log density of `x` under a Gaussian kernel density over `training`.
///
fn log_density(x: f64, training: &[f64], bandwidth: f64) -> f64 {
    let exponents: Vec<f64> = training
        .iter()
        .map(|t| -0.5 * ((x - t) / bandwidth).powi(2))
        .collect();
    let max = exponents.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    let sum: f64 = exponents.iter().map(|e| (e - max).exp()).sum();
    let log_norm = (training.len() as f64).ln() + bandwidth.ln() + 0.5 * (2.0 * PI).ln();

    max + sum.ln() - log_norm
}

///
/// Mean held-out log-likelihood of one bandwidth across `folds` folds.
///
pub fn cross_validated_score(samples: &[f64], bandwidth: f64, folds: usize) -> f64 {
    let bounds = fold_bounds(samples.len(), folds);
    let total: f64 = bounds
        .iter()
        .map(|&(start, end)| {
            let training: Vec<f64> = samples[..start]
                .iter()
                .chain(&samples[end..])
                .copied()
                .collect();
            samples[start..end]
                .iter()
                .map(|&x| log_density(x, &training, bandwidth))
                .sum::<f64>()
        })
        .sum();
    total / bounds.len() as f64
}

///
/// Score every grid candidate in parallel and return the best one.
/// Ties go to the smaller candidate.
///
pub fn select_bandwidth(samples: &[f64], folds: usize) -> Result<f64> {
    if folds < 2 {
        return Err(FlankFoldError::InvalidConfig(format!(
            "at least 2 cross-validation folds required, got {}",
            folds
        )));
    }
    if samples.len() < folds {
        return Err(FlankFoldError::InvalidConfig(format!(
            "{} samples cannot be split into {} cross-validation folds",
            samples.len(),
            folds
        )));
    }

    let grid = bandwidth_grid();
    let scores: Vec<f64> = grid
        .par_iter()
        .map(|&bandwidth| cross_validated_score(samples, bandwidth, folds))
        .collect();

    let mut best = 0;
    for (i, score) in scores.iter().enumerate() {
        if *score > scores[best] || (scores[best].is_nan() && !score.is_nan()) {
            best = i;
        }
    }

    debug!("Bandwidth scores: {:?}, selected {}", scores, grid[best]);

    Ok(grid[best])
}
