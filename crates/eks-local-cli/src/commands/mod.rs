//! CLI commands

use std::path::{Path, PathBuf};

use crate::{Error, Result};

pub mod apply;
pub mod format;
pub mod inspect;
pub mod list;
pub mod read;

/// Return the value of a required flag, treating an empty value as missing
fn required<'a>(
    value: Option<&'a str>,
    command: &'static str,
    flag: &'static str,
) -> Result<&'a str> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::missing_argument(command, flag))
}

/// [`required`] for path-valued flags
fn required_path<'a>(
    value: Option<&'a PathBuf>,
    command: &'static str,
    flag: &'static str,
) -> Result<&'a Path> {
    value
        .map(PathBuf::as_path)
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| Error::missing_argument(command, flag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_count_as_missing() {
        assert!(required(Some("c1"), "read", "--name").is_ok());
        assert_eq!(required(Some(""), "read", "--name").unwrap_err().exit_code(), 2);
        assert_eq!(required(None, "read", "--name").unwrap_err().exit_code(), 2);

        let empty = PathBuf::new();
        let err = required_path(Some(&empty), "apply", "--file").unwrap_err();
        assert_eq!(err.to_string(), "apply requires --file");
    }
}
