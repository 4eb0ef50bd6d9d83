//! Error types for the Rehydra core library.

use thiserror::Error;

/// Result type alias for rehydra-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or assembling a corpus.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Input corpus is structurally invalid (missing or malformed fields).
    #[error("Invalid corpus: {message}")]
    InvalidCorpus {
        /// What is wrong with the input
        message: String,
    },

    /// I/O error (reading input, writing output)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Creates a new invalid-corpus error.
    pub fn invalid_corpus<S: Into<String>>(message: S) -> Self {
        Error::InvalidCorpus {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_corpus_display() {
        let err = Error::invalid_corpus("missing 'thread_url'");
        assert_eq!(err.to_string(), "Invalid corpus: missing 'thread_url'");
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: Error = serde_err.into();
        assert!(err.to_string().starts_with("Serialization error"));
    }

    #[test]
    fn test_error_implements_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
