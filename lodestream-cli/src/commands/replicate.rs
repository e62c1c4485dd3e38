use super::{ConfigArgs, open_all, parse};
use crate::router::{Command, RouterError};
use anyhow::{Context, Result, bail};
use clap::Parser;
use lodestream_core::{Config, Db};
use tracing::info;

/// Run a server replicating every configured database
#[derive(Debug, Parser)]
pub struct ReplicateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

pub async fn run(args: &[String]) -> Result<(), RouterError> {
    let args: ReplicateArgs = parse(Command::Replicate, args)?;
    let config = args.config.load()?;

    let mut dbs = start(&config)?;
    info!("replicating {} databases, press Ctrl-C to stop", dbs.len());

    tokio::signal::ctrl_c()
        .await
        .context("cannot listen for shutdown signal")?;

    info!("signal received, stopping replicas");
    stop(&mut dbs);
    Ok(())
}

/// Build every database and start its replicas
pub fn start(config: &Config) -> Result<Vec<Db>> {
    if config.dbs.is_empty() {
        bail!("configuration specifies no databases");
    }

    let mut dbs = open_all(config)?;
    for db in &mut dbs {
        info!(
            db = %db.path().display(),
            replicas = db.replicas().len(),
            "initialized database"
        );
        db.start_replicas();
    }
    Ok(dbs)
}

pub fn stop(dbs: &mut [Db]) {
    for db in dbs {
        db.stop_replicas();
    }
}
