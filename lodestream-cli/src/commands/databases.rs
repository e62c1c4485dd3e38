use super::{ConfigArgs, open_all, parse};
use crate::router::{Command, RouterError};
use anyhow::Result;
use clap::Parser;
use lodestream_core::Config;
use std::io::{self, Write};

/// List databases specified in the config file
#[derive(Debug, Parser)]
pub struct DatabasesArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

pub fn run(args: &[String]) -> Result<(), RouterError> {
    let args: DatabasesArgs = parse(Command::Databases, args)?;
    let config = args.config.load()?;
    execute(&config, &mut io::stdout().lock())?;
    Ok(())
}

/// Print one row per database: path and replica names
pub fn execute(config: &Config, out: &mut impl Write) -> Result<()> {
    let dbs = open_all(config)?;
    let width = dbs
        .iter()
        .map(|db| db.path().display().to_string().len())
        .chain(std::iter::once("path".len()))
        .max()
        .unwrap_or_default();

    writeln!(out, "{:<width$}  replicas", "path")?;
    for db in &dbs {
        let names: Vec<_> = db.replicas().iter().map(|r| r.name()).collect();
        writeln!(
            out,
            "{:<width$}  {}",
            db.path().display().to_string(),
            names.join(",")
        )?;
    }
    Ok(())
}
