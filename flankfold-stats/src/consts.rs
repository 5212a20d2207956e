/// Bandwidth candidates are log-spaced over `[BANDWIDTH_GRID_MIN, BANDWIDTH_GRID_MAX]`.
pub const BANDWIDTH_GRID_MIN: f64 = 0.1;
pub const BANDWIDTH_GRID_MAX: f64 = 1.0;
pub const BANDWIDTH_GRID_POINTS: usize = 10;

/// Added to the last sample when the density fit is singular.
pub const SINGULAR_EPSILON: f64 = 1e-14;

/// Null distribution substituted when every simulated fold change is zero:
/// `DEGENERATE_ZEROS` zeros followed by one `DEGENERATE_PSEUDOCOUNT`.
pub const DEGENERATE_ZEROS: usize = 999;
pub const DEGENERATE_PSEUDOCOUNT: f64 = 1.0;

pub const MAX_BISECTION_STEPS: usize = 100;
