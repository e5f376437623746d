//! Common types for the local EKS backend: cluster model, canonical
//! ordering, document codecs and the file-backed record store

pub mod canonical;
pub mod codec;
pub mod crd;
pub mod error;
pub mod inspect;
pub mod store;

pub use error::{Error, Result};
pub use store::{ClusterStore, StoredCluster, STORE_FILE_NAME};
