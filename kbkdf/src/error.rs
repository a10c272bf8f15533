//! Error types for the kbkdf crate.

/// Errors that can occur during key derivation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input provided to an operation was invalid.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A PRF returned a block inconsistent with its declared output length.
    #[error("PRF output length mismatch: expected {expected} bytes, got {actual}")]
    PrfOutputLength {
        /// Output length the PRF declared, in bytes.
        expected: usize,
        /// Length of the block the PRF actually returned.
        actual: usize,
    },

    /// The underlying PRF reported a failure.
    #[error("PRF failed: {0}")]
    PrfFailed(String),
}

/// Result type alias for kbkdf operations.
pub type Result<T> = std::result::Result<T, Error>;
