//! Store path resolution
//!
//! The store path resolution chain (highest priority first):
//! 1. Explicit `--store` flag
//! 2. `EKS_LOCAL_STORE` environment variable
//! 3. `.eks-local-backend.json` in the current directory
//! 4. Relative `.eks-local-backend.json` if the current directory is unknown

use std::path::{Path, PathBuf};

use eks_local_common::STORE_FILE_NAME;
use tracing::debug;

/// Environment variable overriding the default store location
pub const STORE_PATH_ENV: &str = "EKS_LOCAL_STORE";

/// Resolve the store file path using the priority chain
pub fn resolve_store_path(explicit: Option<&Path>) -> PathBuf {
    let env = std::env::var_os(STORE_PATH_ENV).map(PathBuf::from);
    let path = resolve_with(explicit, env, std::env::current_dir().ok());
    debug!(path = %path.display(), "resolved store path");
    path
}

fn resolve_with(explicit: Option<&Path>, env: Option<PathBuf>, cwd: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return path.to_path_buf();
    }

    if let Some(path) = env.filter(|p| !p.as_os_str().is_empty()) {
        return path;
    }

    match cwd {
        Some(dir) => dir.join(STORE_FILE_NAME),
        None => PathBuf::from(STORE_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flag_wins() {
        let path = resolve_with(
            Some(Path::new("/explicit/store.json")),
            Some(PathBuf::from("/env/store.json")),
            Some(PathBuf::from("/work")),
        );
        assert_eq!(path, PathBuf::from("/explicit/store.json"));
    }

    #[test]
    fn env_beats_default() {
        let path = resolve_with(None, Some(PathBuf::from("/env/store.json")), Some(PathBuf::from("/work")));
        assert_eq!(path, PathBuf::from("/env/store.json"));
    }

    #[test]
    fn empty_env_is_ignored() {
        let path = resolve_with(None, Some(PathBuf::new()), Some(PathBuf::from("/work")));
        assert_eq!(path, PathBuf::from("/work/.eks-local-backend.json"));
    }

    #[test]
    fn falls_back_to_relative_name_without_cwd() {
        assert_eq!(resolve_with(None, None, None), PathBuf::from(STORE_FILE_NAME));
    }
}
