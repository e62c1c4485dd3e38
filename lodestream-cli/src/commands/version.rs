use super::parse;
use crate::router::{Command, RouterError};
use clap::Parser;

/// Print the version
#[derive(Debug, Parser)]
pub struct VersionArgs {}

pub fn run(args: &[String], version: &str) -> Result<(), RouterError> {
    let _: VersionArgs = parse(Command::Version, args)?;
    println!("lodestream {version}");
    Ok(())
}
