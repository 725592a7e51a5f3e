use std::path::PathBuf;

/// Errors from parameter loading, validation and layout derivation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid parameter document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("mask shape {actual:?} does not match magnet grid {expected:?}")]
    MaskShape {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("mask rows have unequal lengths")]
    RaggedMask,

    #[error("unknown design variable: {0}")]
    UnknownDesignVariable(String),

    #[error("design variable {name} = {value} outside [{min}, {max}]")]
    OutOfBounds {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },
}
