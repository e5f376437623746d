//! List command

use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;
use clap::Args;

use eks_local_common::ClusterStore;

use super::format::{format_age, write_table};
use crate::config::resolve_store_path;
use crate::Result;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Store file (defaults to $EKS_LOCAL_STORE or ./.eks-local-backend.json)
    #[arg(long)]
    pub store: Option<PathBuf>,
}

pub fn run<W: Write>(args: ListArgs, out: &mut W) -> Result<()> {
    let store = ClusterStore::load(&resolve_store_path(args.store.as_deref()))?;
    let now = Utc::now();

    let rows: Vec<Vec<String>> = store
        .iter()
        .map(|(key, record)| {
            vec![
                key.to_string(),
                record.config.self_managed().count().to_string(),
                record.config.managed().count().to_string(),
                format_age(record.updated_at, now),
            ]
        })
        .collect();

    write_table(out, &["KEY", "NODE GROUPS", "MANAGED", "UPDATED"], &rows)?;
    Ok(())
}
