use super::{DbArgs, parse};
use crate::router::{Command, RouterError};
use anyhow::{Context, Result, bail};
use clap::Parser;
use lodestream_core::Db;
use std::path::PathBuf;
use tracing::info;

/// Recover a database backup from a replica
#[derive(Debug, Parser)]
pub struct RestoreArgs {
    #[command(flatten)]
    pub db: DbArgs,

    /// Output path of the restored database (defaults to the database path)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

pub fn run(args: &[String]) -> Result<(), RouterError> {
    let args: RestoreArgs = parse(Command::Restore, args)?;
    let db = args.db.open()?;
    execute(&args, &db)?;
    Ok(())
}

/// Restore from the selected replica, or the first one when none is named
pub fn execute(args: &RestoreArgs, db: &Db) -> Result<()> {
    let replicas = args.db.select(db)?;
    let Some(replica) = replicas.first() else {
        bail!("no replicas configured for database {}", db.path().display());
    };

    let output = args.output.clone().unwrap_or_else(|| db.path().to_path_buf());
    if output.exists() {
        bail!("cannot restore, output path already exists: {}", output.display());
    }

    info!(replica = replica.name(), output = %output.display(), "restoring database");
    replica
        .restore(&output)
        .with_context(|| format!("cannot restore from replica {:?}", replica.name()))
}
