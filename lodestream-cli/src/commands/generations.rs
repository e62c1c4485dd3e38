use super::{DbArgs, parse};
use crate::router::{Command, RouterError};
use anyhow::Result;
use clap::Parser;
use lodestream_core::Replica;
use std::io::{self, Write};
use tracing::warn;

/// List available generations for a database
#[derive(Debug, Parser)]
pub struct GenerationsArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

pub fn run(args: &[String]) -> Result<(), RouterError> {
    let args: GenerationsArgs = parse(Command::Generations, args)?;
    let db = args.db.open()?;
    let replicas = args.db.select(&db)?;
    execute(&replicas, &mut io::stdout().lock())?;
    Ok(())
}

/// Replicas that cannot list their generations are skipped with a warning.
pub fn execute(replicas: &[&dyn Replica], out: &mut impl Write) -> Result<()> {
    writeln!(out, "name\tgeneration")?;
    for replica in replicas {
        let generations = match replica.generations() {
            Ok(generations) => generations,
            Err(e) => {
                warn!(replica = replica.name(), "cannot list generations: {}", e);
                continue;
            }
        };
        for generation in generations {
            writeln!(out, "{}\t{}", replica.name(), generation)?;
        }
    }
    Ok(())
}
