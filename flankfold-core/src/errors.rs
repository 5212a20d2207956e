use thiserror::Error;

/// Broad category of a [`FlankFoldError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Data,
    NumericalDegeneracy,
    Io,
}

#[derive(Error, Debug)]
pub enum FlankFoldError {
    //
    // configuration
    //
    #[error("Window size ({window_size}) minus feature size ({feature_size}) must be even to split into two flanks")]
    UnevenFlanks {
        window_size: usize,
        feature_size: usize,
    },

    #[error("Feature size ({feature_size}) must be smaller than the window size ({window_size})")]
    FeatureLargerThanWindow {
        window_size: usize,
        feature_size: usize,
    },

    #[error("Region sizes must be positive: {0}")]
    EmptyRegion(String),

    #[error("Number of simulations must be greater than 0")]
    NoSimulations,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    //
    // data
    //
    #[error("Population size is zero: {0}")]
    ZeroPopulation(String),

    #[error("No mutations observed in the flanks, fold change is undefined")]
    ZeroFlankCount,

    #[error("Sequence for feature {0} could not be retrieved")]
    MissingSequence(String),

    #[error("Sequence for feature {feature_id} has length {found}, expected {expected}")]
    SequenceLength {
        feature_id: String,
        expected: usize,
        found: usize,
    },

    #[error("No representable trinucleotide context in feature {0}")]
    UnrepresentableContexts(String),

    #[error("Position weights of feature {feature_id} cannot be sampled: {message}")]
    InvalidWeights { feature_id: String, message: String },

    #[error("Relative position {position} of feature {feature_id} is outside the window of size {window_size}")]
    PositionOutOfWindow {
        feature_id: String,
        position: usize,
        window_size: usize,
    },

    #[error("Invalid feature identifier: {0}")]
    InvalidFeatureId(String),

    #[error("Signature {0} not found in signature table")]
    UnknownSignature(String),

    #[error("Error parsing {file}: {message}")]
    ParseError { file: String, message: String },

    #[error("No observations to analyse: {0}")]
    EmptyObservations(String),

    //
    // numerical
    //
    #[error("Kernel density fit is singular: {0}")]
    SingularDensity(String),

    #[error("Tail probability stays at zero after {0} bisection steps")]
    NoPositiveTail(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FlankFoldError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FlankFoldError::UnevenFlanks { .. }
            | FlankFoldError::FeatureLargerThanWindow { .. }
            | FlankFoldError::EmptyRegion(_)
            | FlankFoldError::NoSimulations
            | FlankFoldError::InvalidConfig(_) => ErrorKind::Configuration,

            FlankFoldError::SingularDensity(_) | FlankFoldError::NoPositiveTail(_) => {
                ErrorKind::NumericalDegeneracy
            }

            FlankFoldError::Io(_) => ErrorKind::Io,

            _ => ErrorKind::Data,
        }
    }
}

pub type Result<T> = std::result::Result<T, FlankFoldError>;
