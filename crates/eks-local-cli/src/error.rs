//! Error types for the CLI

use std::process::ExitCode;

/// CLI Result type
pub type Result<T> = std::result::Result<T, Error>;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] eks_local_common::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{command} requires {flag}")]
    MissingArgument {
        command: &'static str,
        flag: &'static str,
    },

    #[error("cluster not found: {key}")]
    ClusterNotFound { key: String },
}

impl Error {
    pub fn missing_argument(command: &'static str, flag: &'static str) -> Self {
        Error::MissingArgument { command, flag }
    }

    pub fn cluster_not_found(key: impl Into<String>) -> Self {
        Error::ClusterNotFound { key: key.into() }
    }

    /// Process exit status for this error: 2 for usage errors caught before
    /// any I/O, 1 for everything else
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::MissingArgument { .. } => 2,
            Error::Store(_) | Error::Io(_) | Error::ClusterNotFound { .. } => 1,
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        ExitCode::from(err.exit_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_argument_is_a_usage_error() {
        let err = Error::missing_argument("apply", "--file");
        assert_eq!(err.to_string(), "apply requires --file");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn not_found_names_the_key() {
        let err = Error::cluster_not_found("p1/c1");
        assert_eq!(err.to_string(), "cluster not found: p1/c1");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn store_errors_exit_with_failure() {
        let err: Error = eks_local_common::Error::decode("store file", "expected value").into();
        assert_eq!(err.to_string(), "decode error in store file: expected value");
        assert_eq!(err.exit_code(), 1);
    }
}
