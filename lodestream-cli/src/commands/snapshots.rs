use super::{DbArgs, parse};
use crate::router::{Command, RouterError};
use anyhow::Result;
use clap::Parser;
use lodestream_core::Replica;
use std::io::{self, Write};
use tracing::warn;

/// List available snapshots for a database
#[derive(Debug, Parser)]
pub struct SnapshotsArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

pub fn run(args: &[String]) -> Result<(), RouterError> {
    let args: SnapshotsArgs = parse(Command::Snapshots, args)?;
    let db = args.db.open()?;
    let replicas = args.db.select(&db)?;
    execute(&replicas, &mut io::stdout().lock())?;
    Ok(())
}

pub fn execute(replicas: &[&dyn Replica], out: &mut impl Write) -> Result<()> {
    writeln!(out, "replica\tgeneration\tsnapshot")?;
    for replica in replicas {
        let listed = replica.generations().and_then(|generations| {
            generations
                .into_iter()
                .map(|g| replica.snapshots(&g).map(|snapshots| (g, snapshots)))
                .collect::<Result<Vec<_>, _>>()
        });

        match listed {
            Ok(listed) => {
                for (generation, snapshots) in listed {
                    for snapshot in snapshots {
                        writeln!(out, "{}\t{}\t{}", replica.name(), generation, snapshot)?;
                    }
                }
            }
            Err(e) => warn!(replica = replica.name(), "cannot list snapshots: {}", e),
        }
    }
    Ok(())
}
