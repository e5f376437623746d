//! File-backed cluster record store
//!
//! The whole store lives in one JSON file holding every record keyed by
//! store key (`project/name`). Each command loads the file, mutates the
//! in-memory map, and rewrites the file in full:
//!
//! - a missing or empty file loads as an empty store
//! - saves go to a temporary file in the same directory which is then
//!   renamed over the target, so readers see the old or the new store
//! - there is no locking: with two concurrent writers the last save wins

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec;
use crate::crd::{EksCluster, EksClusterConfig};
use crate::{Error, Result};

/// Default store file name, resolved against the working directory
pub const STORE_FILE_NAME: &str = ".eks-local-backend.json";

/// One persisted cluster: descriptor, configuration and last write time
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct StoredCluster {
    pub cluster: EksCluster,
    pub config: EksClusterConfig,
    pub updated_at: DateTime<Utc>,
}

/// In-memory view of the store file
#[derive(Clone, Debug, Default)]
pub struct ClusterStore {
    clusters: BTreeMap<String, StoredCluster>,
}

impl ClusterStore {
    /// Load the store at `path`.
    ///
    /// A missing file, or one holding only whitespace, yields an empty
    /// store. Any other read failure is an IO error; content that is not a
    /// valid store document is a decode error.
    pub fn load(path: &Path) -> Result<Self> {
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "store file not found, starting empty");
                return Ok(Self::default());
            }
            Err(e) => return Err(Error::io(path, e)),
        };

        if data.iter().all(u8::is_ascii_whitespace) {
            debug!(path = %path.display(), "store file empty, starting empty");
            return Ok(Self::default());
        }

        let clusters = codec::decode_store(&data)?;
        debug!(path = %path.display(), records = clusters.len(), "loaded store");
        Ok(Self { clusters })
    }

    /// Persist the whole store to `path`, replacing any existing file
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = codec::encode_store(&self.clusters)?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
        tmp.write_all(data.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| Error::io(tmp.path(), e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(tmp.path(), std::fs::Permissions::from_mode(0o644))
                .map_err(|e| Error::io(tmp.path(), e))?;
        }

        tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
        debug!(path = %path.display(), records = self.clusters.len(), "saved store");
        Ok(())
    }

    /// Scoped load-mutate-persist cycle on the store file.
    ///
    /// Loads the store at `path`, runs `f`, and saves only if `f` succeeds.
    /// When `f` fails the file on disk is left untouched.
    pub fn update<T, F>(path: &Path, f: F) -> Result<T>
    where
        F: FnOnce(&mut ClusterStore) -> Result<T>,
    {
        let mut store = Self::load(path)?;
        let out = f(&mut store)?;
        store.save(path)?;
        Ok(out)
    }

    /// Insert or fully replace the record under `key`, stamped with the
    /// current UTC time.
    pub fn upsert(
        &mut self,
        key: impl Into<String>,
        cluster: EksCluster,
        config: EksClusterConfig,
    ) -> &StoredCluster {
        self.upsert_at(key, cluster, config, Utc::now())
    }

    /// [`upsert`](Self::upsert) with an explicit timestamp
    pub fn upsert_at(
        &mut self,
        key: impl Into<String>,
        cluster: EksCluster,
        config: EksClusterConfig,
        updated_at: DateTime<Utc>,
    ) -> &StoredCluster {
        let key = key.into();
        let record = StoredCluster {
            cluster,
            config,
            updated_at,
        };
        match self.clusters.entry(key) {
            std::collections::btree_map::Entry::Occupied(mut entry) => {
                debug!(key = %entry.key(), "replacing stored cluster");
                entry.insert(record);
                entry.into_mut()
            }
            std::collections::btree_map::Entry::Vacant(entry) => {
                debug!(key = %entry.key(), "storing new cluster");
                entry.insert(record)
            }
        }
    }

    /// Look up the record under `key`
    pub fn get(&self, key: &str) -> Option<&StoredCluster> {
        self.clusters.get(key)
    }

    /// Store keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.clusters.keys().map(String::as_str)
    }

    /// Records in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StoredCluster)> {
        self.clusters.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}
