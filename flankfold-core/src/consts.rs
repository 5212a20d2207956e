pub const DEFAULT_WINDOW_SIZE: usize = 2000;
pub const DEFAULT_NSIM: usize = 1000;
pub const DEFAULT_CV_FOLDS: usize = 5;

// observed hits table
pub const ID_COLUMN: &str = "ID";
pub const POS_COLUMN: &str = "POS";
pub const REL_POS_COLUMN: &str = "POS_REL_START";
pub const SIGNATURE_COLUMN: &str = "SIGNATURE";

// SBS96 signature table
pub const MUTATION_TYPE_COLUMN: &str = "Type";
