//! Error types for the local cluster store
//!
//! Errors carry the file path or document they relate to so a single
//! diagnostic line is enough to locate the failure.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for store, codec and model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the local cluster store
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem error other than a missing store file on load
    #[error("io error on {}: {source}", .path.display())]
    Io {
        /// File or directory being accessed
        path: PathBuf,
        /// The underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// Malformed YAML document or persisted store content
    #[error("decode error in {context}: {message}")]
    Decode {
        /// What was being decoded (e.g. "cluster document", "store file")
        context: String,
        /// Description of what's malformed
        message: String,
    },

    /// Serialization failure while producing a document or the store file
    #[error("encode error in {context}: {message}")]
    Encode {
        /// What was being encoded
        context: String,
        /// Description of what failed
        message: String,
    },

    /// Invalid selector or argument value
    #[error("validation error: {message}")]
    Validation {
        /// Description of what's invalid
        message: String,
    },
}

impl Error {
    /// Create an IO error for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a decode error
    pub fn decode(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an encode error
    pub fn encode(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Encode {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Returns true if this error came from reading or writing a file
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns true if this error came from malformed input
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}
