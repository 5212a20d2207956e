//! Kernel density p-values for the observed fold change.
//!
//! [`DensityPvalueEstimator`] fits a Gaussian kernel density to the simulated
//! fold changes and hands back a [`FittedDensity`]; only a fitted density can
//! be queried, and querying never changes it.

pub mod bandwidth;
pub mod kde;

use log::{debug, warn};

use flankfold_core::consts::DEFAULT_CV_FOLDS;
use flankfold_core::errors::{FlankFoldError, Result};

use crate::consts::{
    DEGENERATE_PSEUDOCOUNT, DEGENERATE_ZEROS, MAX_BISECTION_STEPS, SINGULAR_EPSILON,
};

pub use bandwidth::{bandwidth_grid, cross_validated_score, select_bandwidth};
pub use kde::GaussianKde;

#[derive(Debug, Clone)]
pub struct DensityPvalueEstimator {
    cv_folds: usize,
}

impl Default for DensityPvalueEstimator {
    fn default() -> Self {
        Self {
            cv_folds: DEFAULT_CV_FOLDS,
        }
    }
}

impl DensityPvalueEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cv_folds(mut self, cv_folds: usize) -> Self {
        self.cv_folds = cv_folds;
        self
    }

    ///
    /// Fit a density to the null fold changes.
    ///
    /// An all-zero null is replaced by 999 zeros and one pseudocount. A
    /// singular fit is retried once with the last sample nudged by `1e-14`;
    /// a second failure is returned as an error.
    ///
    /// # Arguments
    ///
    /// - expected_fc: simulated fold changes, one per simulation
    ///
    pub fn fit(&self, expected_fc: &[f64]) -> Result<FittedDensity> {
        let mut samples: Vec<f64> = if expected_fc.iter().sum::<f64>() == 0.0 {
            warn!("Null distribution sums to zero, substituting a pseudocount sample");
            let mut samples = vec![0.0; DEGENERATE_ZEROS];
            samples.push(DEGENERATE_PSEUDOCOUNT);
            samples
        } else {
            expected_fc.to_vec()
        };

        let mut kde = match GaussianKde::fit(samples.clone()) {
            Ok(kde) => kde,
            Err(FlankFoldError::SingularDensity(reason)) => {
                warn!("Singular density fit ({}), perturbing last sample", reason);
                if let Some(last) = samples.last_mut() {
                    *last += SINGULAR_EPSILON;
                }
                GaussianKde::fit(samples.clone())?
            }
            Err(e) => return Err(e),
        };

        let bandwidth = select_bandwidth(&samples, self.cv_folds)?;
        kde.set_bandwidth(bandwidth);
        debug!(
            "Fitted density on {} samples, bandwidth {}",
            samples.len(),
            bandwidth
        );

        Ok(FittedDensity { kde })
    }
}

///
/// Density fitted to a null distribution, ready to be queried.
///
#[derive(Debug, Clone)]
pub struct FittedDensity {
    kde: GaussianKde,
}

impl FittedDensity {
    pub fn bandwidth(&self) -> f64 {
        self.kde.bandwidth()
    }

    pub fn kde(&self) -> &GaussianKde {
        &self.kde
    }

    /// Mass of the density over `[low, +inf)`.
    pub fn tail_probability(&self, low: f64) -> f64 {
        self.kde.integrate_upper_tail(low)
    }

    ///
    /// Upper tail probability of `observed`, always in `(0, 1]`.
    ///
    /// When the tail rounds to zero, `[0, observed]` is bisected: a zero
    /// tail at the midpoint lowers the upper bound, a positive one raises the
    /// lower bound. After 100 steps the smallest positive tail seen is
    /// returned, a lower bound on the resolution rather than the exact value.
    ///
    pub fn p_value(&self, observed: f64) -> Result<f64> {
        let direct = self.tail_probability(observed);
        if direct > 0.0 {
            return Ok(direct.min(1.0));
        }

        debug!("Tail above {} underflows, bisecting", observed);

        let (mut down, mut up) = (0.0, observed);
        let mut smallest: Option<f64> = None;
        for _ in 0..MAX_BISECTION_STEPS {
            let mid = down + (up - down) / 2.0;
            let pvalue = self.tail_probability(mid);
            if pvalue > 0.0 {
                smallest = Some(smallest.map_or(pvalue, |s: f64| s.min(pvalue)));
                down = mid;
            } else {
                up = mid;
            }
        }

        smallest
            .map(|p| p.min(1.0))
            .ok_or(FlankFoldError::NoPositiveTail(MAX_BISECTION_STEPS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flankfold_core::errors::ErrorKind;

    use pretty_assertions::assert_eq;
    use rand::prelude::*;
    use rand_distr::Normal;
    use rstest::*;

    #[fixture]
    fn null_distribution() -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(11);
        let normal = Normal::new(1.0, 0.2).unwrap();
        (0..1000).map(|_| normal.sample(&mut rng)).collect()
    }

    #[fixture]
    fn fitted(null_distribution: Vec<f64>) -> FittedDensity {
        DensityPvalueEstimator::new().fit(&null_distribution).unwrap()
    }

    #[rstest]
    fn test_bandwidth_from_grid(fitted: FittedDensity) {
        let grid = bandwidth_grid();
        assert!(grid.contains(&fitted.bandwidth()));
    }

    #[rstest]
    fn test_pvalue_monotone_non_increasing(fitted: FittedDensity) {
        let pvalues: Vec<f64> = (0..60)
            .map(|i| fitted.p_value(i as f64 * 0.05).unwrap())
            .collect();
        for pair in pvalues.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
    }

    #[rstest]
    fn test_pvalue_in_unit_interval(fitted: FittedDensity) {
        for observed in [-10.0, 0.0, 1.0, 1.5, 2.0] {
            let p = fitted.p_value(observed).unwrap();
            assert!(p > 0.0 && p <= 1.0);
        }
        assert!((fitted.p_value(1.0).unwrap() - 0.5).abs() < 0.05);
    }

    #[rstest]
    fn test_extreme_tail_falls_back_to_bisection(fitted: FittedDensity) {
        let observed = 1e3;
        assert_eq!(fitted.tail_probability(observed), 0.0);

        let p = fitted.p_value(observed).unwrap();
        assert!(p > 0.0);
        assert!(p <= fitted.p_value(2.0).unwrap());
        // the estimate is no smaller than the tail right past the last sample
        let max_sample = fitted.kde().samples().iter().cloned().fold(f64::MIN, f64::max);
        assert!(p < fitted.tail_probability(max_sample));
    }

    #[rstest]
    fn test_pvalue_is_idempotent(fitted: FittedDensity) {
        assert_eq!(fitted.p_value(1.7).unwrap(), fitted.p_value(1.7).unwrap());
        assert_eq!(fitted.p_value(50.0).unwrap(), fitted.p_value(50.0).unwrap());
    }

    #[rstest]
    fn test_all_zero_null_uses_pseudocount() {
        let fitted = DensityPvalueEstimator::new().fit(&[0.0; 20]).unwrap();
        assert_eq!(fitted.kde().samples().len(), 1000);
        let p = fitted.p_value(0.5).unwrap();
        assert!(p > 0.0 && p <= 1.0);
    }

    #[rstest]
    fn test_identical_samples_are_perturbed() {
        let fitted = DensityPvalueEstimator::new().fit(&[1.0; 10]).unwrap();
        let samples = fitted.kde().samples();
        assert_eq!(samples[0], 1.0);
        assert_eq!(samples[9], 1.0 + 1e-14);
    }

    #[rstest]
    fn test_unrecoverable_singular_fit() {
        let err = DensityPvalueEstimator::new().fit(&[2.5]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NumericalDegeneracy);
    }
}
