pub mod config;
pub mod feature;
pub mod geometry;
pub mod hits;
pub mod profile;
pub mod signature;

// re-export for cleaner imports
pub use self::config::AnalysisConfig;
pub use self::feature::FeatureWindow;
pub use self::geometry::WindowGeometry;
pub use self::hits::{FeatureMutations, ObservedHit, ObservedHits};
pub use self::profile::PositionCountProfile;
pub use self::signature::SignatureTable;
