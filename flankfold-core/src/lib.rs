//! Core models, errors and loaders for flankfold.
//!
//! flankfold tests whether the mutation density inside a genomic feature
//! (e.g. a CTCF binding site) differs from the density in its flanks more than
//! expected under a trinucleotide-context null model. This crate holds what
//! the statistics and the command line share:
//!
//! - [`models`] - window geometry, feature identifiers, count profiles, configuration
//! - [`io`] - loaders for observed hits, SBS96 signature tables and window sequences
//! - [`sequence`] - the [`sequence::SequenceSource`] seam for injecting sequences
//! - [`errors`] - the error type shared across the workspace

pub mod consts;
pub mod errors;
pub mod io;
pub mod models;
pub mod sequence;
pub mod utils;

// re-exports
pub use errors::{ErrorKind, FlankFoldError, Result};
pub use sequence::{SequenceSource, WindowSequences};
