use std::f64::consts::SQRT_2;

use statrs::function::erf::erfc;

use flankfold_core::errors::{FlankFoldError, Result};

/// Standard normal cumulative distribution function.
pub(crate) fn standard_normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / SQRT_2)
}

///
/// One dimensional Gaussian kernel density estimate.
///
/// The kernel standard deviation is `factor * sd(samples)`, with the sample
/// standard deviation taken with one degree of freedom. The factor starts at
/// Scott's rule, `n^(-1/5)`, and can be replaced with [`GaussianKde::set_bandwidth`].
///
#[derive(Debug, Clone)]
pub struct GaussianKde {
    samples: Vec<f64>,
    sample_sd: f64,
    factor: f64,
}

impl GaussianKde {
    ///
    /// Fit the estimate. Fails when the sample covariance is singular:
    /// fewer than two samples, identical samples or non-finite values.
    ///
    pub fn fit(samples: Vec<f64>) -> Result<Self> {
        let n = samples.len();
        if n < 2 {
            return Err(FlankFoldError::SingularDensity(format!(
                "{} sample(s), at least 2 required",
                n
            )));
        }

        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance =
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        if !variance.is_finite() || variance <= 0.0 {
            return Err(FlankFoldError::SingularDensity(format!(
                "sample variance is {}",
                variance
            )));
        }

        Ok(GaussianKde {
            samples,
            sample_sd: variance.sqrt(),
            factor: (n as f64).powf(-0.2),
        })
    }

    pub fn set_bandwidth(&mut self, factor: f64) {
        self.factor = factor;
    }

    /// Current bandwidth factor.
    pub fn bandwidth(&self) -> f64 {
        self.factor
    }

    pub fn kernel_sd(&self) -> f64 {
        self.sample_sd * self.factor
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    ///
    /// Probability mass of the density over `[low, +inf)`.
    ///
    /// Each kernel contributes `1 - Phi(z)`, which rounds to exactly zero once
    /// `low` is roughly eight kernel deviations above every sample.
    ///
    pub fn integrate_upper_tail(&self, low: f64) -> f64 {
        let sd = self.kernel_sd();
        let total: f64 = self
            .samples
            .iter()
            .map(|x| 1.0 - standard_normal_cdf((low - x) / sd))
            .sum();
        total / self.samples.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_standard_normal_cdf() {
        assert!((standard_normal_cdf(0.0) - 0.5).abs() < 1e-15);
        assert!((standard_normal_cdf(1.959963984540054) - 0.975).abs() < 1e-10);
        assert_eq!(1.0 - standard_normal_cdf(40.0), 0.0);
    }

    #[rstest]
    fn test_scott_factor() {
        let kde = GaussianKde::fit(vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((kde.bandwidth() - 4f64.powf(-0.2)).abs() < 1e-15);
        let sd = (5.0f64 / 3.0).sqrt();
        assert!((kde.kernel_sd() - sd * 4f64.powf(-0.2)).abs() < 1e-12);
    }

    #[rstest]
    fn test_tail_of_symmetric_sample_at_centre() {
        let mut kde = GaussianKde::fit(vec![-1.0, 1.0]).unwrap();
        kde.set_bandwidth(0.5);
        assert!((kde.integrate_upper_tail(0.0) - 0.5).abs() < 1e-12);
        assert!(kde.integrate_upper_tail(-100.0) <= 1.0);
        assert_eq!(kde.integrate_upper_tail(100.0), 0.0);
    }

    #[rstest]
    #[case(vec![2.0, 2.0, 2.0])]
    #[case(vec![2.0])]
    #[case(vec![])]
    #[case(vec![1.0, f64::NAN])]
    fn test_singular_samples(#[case] samples: Vec<f64>) {
        assert!(matches!(
            GaussianKde::fit(samples),
            Err(FlankFoldError::SingularDensity(_))
        ));
    }
}
