//! Apply command

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use tracing::{debug, info};

use eks_local_common::canonical;
use eks_local_common::codec;
use eks_local_common::ClusterStore;

use super::required_path;
use crate::config::resolve_store_path;
use crate::Result;

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Two-document YAML file: cluster descriptor, then cluster config
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Store file (defaults to $EKS_LOCAL_STORE or ./.eks-local-backend.json)
    #[arg(long)]
    pub store: Option<PathBuf>,
}

/// Decode, canonicalize and store one cluster, replacing any previous
/// record under the same key. The store file is untouched on failure.
pub fn run<W: Write>(args: ApplyArgs, out: &mut W) -> Result<()> {
    let file = required_path(args.file.as_ref(), "apply", "--file")?;
    let store_path = resolve_store_path(args.store.as_deref());

    let (cluster, mut config) = codec::read_documents(file)?;
    if !canonical::is_canonical(&config) {
        debug!(file = %file.display(), "reordering node groups by name");
    }
    canonical::normalize(&mut config);

    let key = cluster.store_key();
    ClusterStore::update(&store_path, |store| {
        store.upsert(key.as_str(), cluster, config);
        Ok(())
    })?;

    info!(key = %key, store = %store_path.display(), "applied cluster");
    writeln!(out, "applied cluster {key}")?;
    Ok(())
}
