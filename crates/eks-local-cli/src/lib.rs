//! Local EKS backend CLI library

pub mod commands;
pub mod config;
pub mod error;

pub use error::{Error, Result};

use std::io::Write;

use clap::{Parser, Subcommand};

/// Local stand-in for the EKS cluster configuration backend
#[derive(Parser, Debug)]
#[command(name = "eks-local-backend")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store a cluster and its configuration from a two-document YAML file
    Apply(commands::apply::ApplyArgs),
    /// Print a stored cluster and its configuration as YAML
    Read(commands::read::ReadArgs),
    /// Print node-group order and ordering-sensitive fields
    Inspect(commands::inspect::InspectArgs),
    /// List stored clusters
    List(commands::list::ListArgs),
}

impl Cli {
    /// Run the CLI command, writing results to stdout
    pub fn run(self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_to(&mut out)
    }

    /// Run the CLI command, writing results to `out`
    pub fn run_to<W: Write>(self, out: &mut W) -> Result<()> {
        match self.command {
            Commands::Apply(args) => commands::apply::run(args, out),
            Commands::Read(args) => commands::read::run(args, out),
            Commands::Inspect(args) => commands::inspect::run(args, out),
            Commands::List(args) => commands::list::run(args, out),
        }
    }
}
