//! Read command

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use eks_local_common::codec;
use eks_local_common::crd::store_key;
use eks_local_common::ClusterStore;

use super::required;
use crate::config::resolve_store_path;
use crate::{Error, Result};

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Cluster name
    #[arg(long)]
    pub name: Option<String>,

    /// Project the cluster belongs to
    #[arg(long, default_value = "")]
    pub project: String,

    /// Store file (defaults to $EKS_LOCAL_STORE or ./.eks-local-backend.json)
    #[arg(long)]
    pub store: Option<PathBuf>,
}

/// Print the stored descriptor and configuration as two YAML documents.
/// Output is written in one piece, so a failure prints nothing.
pub fn run<W: Write>(args: ReadArgs, out: &mut W) -> Result<()> {
    let name = required(args.name.as_deref(), "read", "--name")?;
    let store_path = resolve_store_path(args.store.as_deref());

    let store = ClusterStore::load(&store_path)?;
    let key = store_key(&args.project, name);
    let record = store
        .get(&key)
        .ok_or_else(|| Error::cluster_not_found(key.as_str()))?;
    debug!(key = %key, updated_at = %record.updated_at, "found stored cluster");

    let documents = codec::encode_documents(&record.cluster, &record.config)?;
    out.write_all(documents.as_bytes())?;
    out.flush()?;
    Ok(())
}
