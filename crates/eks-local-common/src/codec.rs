//! Document and persistence codecs
//!
//! Two independent surfaces:
//! - the YAML document surface: a cluster descriptor followed by its
//!   configuration, as two documents in one stream
//! - the JSON persistence surface: the whole store as one indented document,
//!   used only for the store file

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::crd::{EksCluster, EksClusterConfig};
use crate::store::StoredCluster;
use crate::{Error, Result};

const CLUSTER_DOCUMENT: &str = "cluster document";
const CONFIG_DOCUMENT: &str = "cluster config document";
const STORE_DOCUMENT: &str = "store file";

/// YAML document separator placed between the two documents on output
pub const DOCUMENT_SEPARATOR: &str = "---\n";

/// Decode a cluster descriptor and its configuration from a YAML stream.
///
/// The stream must contain at least two documents: the descriptor first,
/// then the configuration. Any later documents are ignored. A missing or
/// malformed document fails the whole decode.
pub fn decode_documents(input: &str) -> Result<(EksCluster, EksClusterConfig)> {
    let mut documents = serde_yaml::Deserializer::from_str(input);

    let cluster = match documents.next() {
        Some(doc) => {
            EksCluster::deserialize(doc).map_err(|e| Error::decode(CLUSTER_DOCUMENT, e.to_string()))?
        }
        None => return Err(Error::decode(CLUSTER_DOCUMENT, "missing document")),
    };

    let config = match documents.next() {
        Some(doc) => EksClusterConfig::deserialize(doc)
            .map_err(|e| Error::decode(CONFIG_DOCUMENT, e.to_string()))?,
        None => return Err(Error::decode(CONFIG_DOCUMENT, "missing document")),
    };

    Ok((cluster, config))
}

/// Read and decode the two-document YAML file at `path`
pub fn read_documents(path: &Path) -> Result<(EksCluster, EksClusterConfig)> {
    let input = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    decode_documents(&input)
}

/// Encode a descriptor and configuration as a two-document YAML stream
pub fn encode_documents(cluster: &EksCluster, config: &EksClusterConfig) -> Result<String> {
    let mut out =
        serde_yaml::to_string(cluster).map_err(|e| Error::encode(CLUSTER_DOCUMENT, e.to_string()))?;
    out.push_str(DOCUMENT_SEPARATOR);
    out.push_str(
        &serde_yaml::to_string(config).map_err(|e| Error::encode(CONFIG_DOCUMENT, e.to_string()))?,
    );
    Ok(out)
}

#[derive(Serialize)]
struct StoreDocumentRef<'a> {
    clusters: &'a BTreeMap<String, StoredCluster>,
}

#[derive(Deserialize)]
struct StoreDocument {
    #[serde(default, deserialize_with = "crate::crd::null_as_default")]
    clusters: BTreeMap<String, StoredCluster>,
}

/// Encode the store records as two-space-indented JSON.
///
/// Keys come out sorted because records live in a `BTreeMap` and every
/// nested map in the model is a `BTreeMap` as well.
pub fn encode_store(clusters: &BTreeMap<String, StoredCluster>) -> Result<String> {
    let mut out = serde_json::to_string_pretty(&StoreDocumentRef { clusters })
        .map_err(|e| Error::encode(STORE_DOCUMENT, e.to_string()))?;
    out.push('\n');
    Ok(out)
}

/// Decode store records from persisted JSON. Unknown fields are ignored.
pub fn decode_store(data: &[u8]) -> Result<BTreeMap<String, StoredCluster>> {
    let doc: StoreDocument =
        serde_json::from_slice(data).map_err(|e| Error::decode(STORE_DOCUMENT, e.to_string()))?;
    Ok(doc.clusters)
}
