/// Result type alias for gesture lookup
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the recognition pipeline
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Invalid stroke: {0}")]
    InvalidStroke(String),

    #[error("Fingerprint length mismatch: expected {expected} bits, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
