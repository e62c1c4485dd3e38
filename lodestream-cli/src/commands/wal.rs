use super::{DbArgs, parse};
use crate::router::{Command, RouterError};
use anyhow::Result;
use clap::Parser;
use lodestream_core::Replica;
use std::io::{self, Write};
use tracing::warn;

/// List available WAL files for a database
#[derive(Debug, Parser)]
pub struct WalArgs {
    #[command(flatten)]
    pub db: DbArgs,

    /// Only list WAL files of this generation
    #[arg(long, value_name = "ID")]
    pub generation: Option<String>,
}

pub fn run(args: &[String]) -> Result<(), RouterError> {
    let args: WalArgs = parse(Command::Wal, args)?;
    let db = args.db.open()?;
    let replicas = args.db.select(&db)?;
    execute(&replicas, args.generation.as_deref(), &mut io::stdout().lock())?;
    Ok(())
}

pub fn execute(
    replicas: &[&dyn Replica],
    generation: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "replica\tgeneration\tpath")?;
    for replica in replicas {
        let generations = match generation {
            Some(g) => Ok(vec![g.to_string()]),
            None => replica.generations(),
        };

        let listed = generations.and_then(|generations| {
            generations
                .into_iter()
                .map(|g| replica.wal_segments(&g).map(|segments| (g, segments)))
                .collect::<Result<Vec<_>, _>>()
        });

        match listed {
            Ok(listed) => {
                for (generation, segments) in listed {
                    for segment in segments {
                        writeln!(out, "{}\t{}\t{}", replica.name(), generation, segment)?;
                    }
                }
            }
            Err(e) => warn!(replica = replica.name(), "cannot list WAL files: {}", e),
        }
    }
    Ok(())
}
