use super::{ConfigArgs, open_all, parse};
use crate::router::{Command, RouterError};
use anyhow::Result;
use clap::Parser;
use humantime::format_duration;
use lodestream_core::Config;
use std::io::{self, Write};
use tracing::info;

/// Check the config file and build every replica it describes
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

pub fn run(args: &[String]) -> Result<(), RouterError> {
    let args: ValidateArgs = parse(Command::Validate, args)?;
    let config = args.config.load()?;
    execute(&config, &mut io::stdout().lock())?;
    Ok(())
}

pub fn execute(config: &Config, out: &mut impl Write) -> Result<()> {
    let dbs = open_all(config)?;
    if dbs.is_empty() {
        info!("config lists no databases");
    }

    for db in &dbs {
        writeln!(out, "{}: ok ({} replicas)", db.path().display(), db.replicas().len())?;
        for replica in db.replicas() {
            let status = replica.status();
            writeln!(
                out,
                "  {} ({}) {} retention={} check={}",
                status.name,
                status.kind,
                status.location,
                format_duration(status.retention),
                format_duration(status.retention_check_interval),
            )?;
        }
    }
    Ok(())
}
