use flankfold_core::errors::{FlankFoldError, Result};

///
/// Ratio of the mutation density inside the feature to the density in its flanks.
///
/// `counts` is laid out as `flank_5 | feature | flank_3`; the 3' flank is
/// everything after the feature. Densities are normalised by the number of
/// positions times the number of features aggregated into `counts`.
///
/// # Arguments
///
/// - counts: mutations per relative window position
/// - feature_size: positions covered by the feature
/// - flank_size: positions in each flank
/// - total_features: number of features summed into `counts`
///
/// # Errors
///
/// Fails when either population is empty or when no mutation falls in the
/// flanks, instead of returning an infinite or undefined ratio.
///
pub fn compute_fold_change(
    counts: &[u64],
    feature_size: usize,
    flank_size: usize,
    total_features: usize,
) -> Result<f64> {
    let feature_end = flank_size + feature_size;
    if counts.len() < feature_end {
        return Err(FlankFoldError::InvalidConfig(format!(
            "profile of length {} is shorter than flank plus feature ({})",
            counts.len(),
            feature_end
        )));
    }

    let population_flank = flank_size * 2 * total_features;
    let population_feature = feature_size * total_features;
    if population_feature == 0 {
        return Err(FlankFoldError::ZeroPopulation(format!(
            "feature ({} positions x {} features)",
            feature_size, total_features
        )));
    }
    if population_flank == 0 {
        return Err(FlankFoldError::ZeroPopulation(format!(
            "flank ({} positions x 2 x {} features)",
            flank_size, total_features
        )));
    }

    let flank_5: u64 = counts[..flank_size].iter().sum();
    let feature: u64 = counts[flank_size..feature_end].iter().sum();
    let flank_3: u64 = counts[feature_end..].iter().sum();
    let flank = flank_5 + flank_3;
    if flank == 0 {
        return Err(FlankFoldError::ZeroFlankCount);
    }

    let prop_feature = feature as f64 / population_feature as f64;
    let prop_flank = flank as f64 / population_flank as f64;

    Ok(prop_feature / prop_flank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flankfold_core::errors::ErrorKind;
    use flankfold_core::models::WindowGeometry;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn concentrated(flank_count: u64, feature_count: u64, geometry: &WindowGeometry) -> Vec<u64> {
        (0..geometry.window_size)
            .map(|i| {
                if i >= geometry.feature_start() && i < geometry.feature_end() {
                    feature_count
                } else {
                    flank_count
                }
            })
            .collect()
    }

    #[rstest]
    #[case(2000, 50, 10)]
    #[case(39, 19, 1)]
    #[case(100, 2, 3)]
    fn test_uniform_counts_give_one(
        #[case] window_size: usize,
        #[case] feature_size: usize,
        #[case] total_features: usize,
    ) {
        let geometry = WindowGeometry::new(window_size, feature_size).unwrap();
        let counts = vec![1; window_size];
        let fc = compute_fold_change(
            &counts,
            geometry.feature_size,
            geometry.flank_size,
            total_features,
        )
        .unwrap();
        assert_eq!(fc, 1.0);
    }

    #[rstest]
    fn test_ctcf_window_uniform() {
        let counts = vec![1; 2000];
        let fc = compute_fold_change(&counts, 50, 975, 10).unwrap();
        assert_eq!(fc, 1.0);
    }

    #[rstest]
    #[case(2)]
    #[case(7)]
    #[case(1000)]
    fn test_scale_invariance(#[case] factor: u64) {
        let counts: Vec<u64> = (0..60).map(|i| (i * 7 % 5) as u64 + 1).collect();
        let scaled: Vec<u64> = counts.iter().map(|c| c * factor).collect();

        let fc = compute_fold_change(&counts, 20, 20, 4).unwrap();
        let fc_scaled = compute_fold_change(&scaled, 20, 20, 4).unwrap();
        assert!((fc - fc_scaled).abs() < 1e-12 * fc.abs());
    }

    #[rstest]
    fn test_feature_enrichment_above_one() {
        let geometry = WindowGeometry::new(2000, 50).unwrap();
        let counts = concentrated(1, 10, &geometry);
        let fc = compute_fold_change(&counts, 50, 975, 5).unwrap();
        assert!(fc > 1.0);
        assert!((fc - 10.0).abs() < 1e-12);
    }

    #[rstest]
    fn test_empty_flanks_rejected() {
        let geometry = WindowGeometry::new(2000, 50).unwrap();
        let counts = concentrated(0, 10, &geometry);
        let err = compute_fold_change(&counts, 50, 975, 5).unwrap_err();
        assert!(matches!(err, FlankFoldError::ZeroFlankCount));
        assert_eq!(err.kind(), ErrorKind::Data);
    }

    #[rstest]
    #[case(50, 975, 0)]
    #[case(50, 0, 10)]
    #[case(0, 975, 10)]
    fn test_zero_population_rejected(
        #[case] feature_size: usize,
        #[case] flank_size: usize,
        #[case] total_features: usize,
    ) {
        let counts = vec![1; 2000];
        let err = compute_fold_change(&counts, feature_size, flank_size, total_features)
            .unwrap_err();
        assert!(matches!(err, FlankFoldError::ZeroPopulation(_)));
    }

    #[rstest]
    fn test_short_profile_rejected() {
        assert!(compute_fold_change(&[1, 1, 1], 2, 2, 1).is_err());
    }
}
