//! Thin loaders for the tables produced upstream of the enrichment test.
//!
//! - observed hits: mutations intersected with feature windows (TSV)
//! - signature table: SBS96 probabilities per signature (TSV)
//! - window sequences: pre-extracted reference sequence of each window (FASTA)
//!
//! All readers accept gzip-compressed input when the path ends with `.gz`.

pub mod fasta;
pub mod hits;
pub mod signatures;

pub use fasta::read_window_sequences;
pub use hits::read_observed_hits;
pub use signatures::read_signature_table;
