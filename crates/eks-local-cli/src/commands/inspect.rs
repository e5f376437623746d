//! Inspect command

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use eks_local_common::codec;
use eks_local_common::crd::{store_key, EksClusterConfig};
use eks_local_common::inspect::{self, Field, ReportFilter};
use eks_local_common::ClusterStore;

use crate::config::resolve_store_path;
use crate::{Error, Result};

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Inspect a two-document YAML file as submitted
    #[arg(long, conflicts_with = "name")]
    pub file: Option<PathBuf>,

    /// Inspect a stored cluster by name
    #[arg(long)]
    pub name: Option<String>,

    /// Project the stored cluster belongs to
    #[arg(long, default_value = "")]
    pub project: String,

    /// Store file (defaults to $EKS_LOCAL_STORE or ./.eks-local-backend.json)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Only report this node group
    #[arg(long)]
    pub group: Option<String>,

    /// Only report this field (taints, attach-ids, instance-types,
    /// suspend-processes, classic-lbs, target-groups)
    #[arg(long)]
    pub field: Option<Field>,
}

pub fn run<W: Write>(args: InspectArgs, out: &mut W) -> Result<()> {
    let config = load_config(&args)?;
    let filter = ReportFilter {
        group: args.group.as_deref(),
        field: args.field,
    };

    let mut buf = String::new();
    for line in inspect::report(&config, filter) {
        buf.push_str(&line);
        buf.push('\n');
    }
    out.write_all(buf.as_bytes())?;
    Ok(())
}

fn load_config(args: &InspectArgs) -> Result<EksClusterConfig> {
    if let Some(file) = args.file.as_deref().filter(|p| !p.as_os_str().is_empty()) {
        let (_, config) = codec::read_documents(file)?;
        return Ok(config);
    }

    let name = args
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| Error::missing_argument("inspect", "--file or --name"))?;
    let store = ClusterStore::load(&resolve_store_path(args.store.as_deref()))?;
    let key = store_key(&args.project, name);
    store
        .get(&key)
        .map(|record| record.config.clone())
        .ok_or_else(|| Error::cluster_not_found(key))
}
