//! Subcommand handlers.
//!
//! Each handler parses its own arguments with clap, loads the config file
//! and builds what it needs through the core factory.

pub mod databases;
pub mod generations;
pub mod replicate;
pub mod restore;
pub mod snapshots;
pub mod validate;
pub mod version;
pub mod wal;

use crate::router::{Command, RouterError};
use anyhow::{Context, Result, anyhow};
use clap::error::ErrorKind;
use clap::{Args, Parser};
use lodestream_core::config::path::expand_home;
use lodestream_core::{Config, ConfigLoader, Db, ProcessHome, Replica, new_db_from_config};
use std::path::{Path, PathBuf};
use tracing::warn;

/// `--config` option shared by every config-driven subcommand
#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Config path (defaults to $LODESTREAM_CONFIG or /etc/lodestream.yml)
    #[arg(
        long = "config",
        value_name = "PATH",
        default_value_os_t = lodestream_core::default_config_path()
    )]
    pub config: PathBuf,
}

impl ConfigArgs {
    pub fn load(&self) -> Result<Config> {
        Ok(ConfigLoader::new().load(&self.config)?)
    }
}

/// Arguments of subcommands that target one database
#[derive(Debug, Clone, Args)]
pub struct DbArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Only consider the replica with this name
    #[arg(long, value_name = "NAME")]
    pub replica: Option<String>,

    /// Database path, as written in the config file
    #[arg(value_name = "DB_PATH")]
    pub db_path: String,
}

impl DbArgs {
    /// Load the config and build the targeted database
    pub fn open(&self) -> Result<Db> {
        let config = self.config.load()?;
        open_db(&config, &self.db_path)
    }

    /// Replicas of `db` selected by `--replica`, all of them when unset
    pub fn select<'a>(&self, db: &'a Db) -> Result<Vec<&'a dyn Replica>> {
        match &self.replica {
            Some(name) => {
                let replica = db.replica(name).ok_or_else(|| {
                    anyhow!("replica {name:?} not found for database {}", db.path().display())
                })?;
                Ok(vec![replica])
            }
            None => Ok(db.replicas().iter().map(|r| r.as_ref()).collect()),
        }
    }
}

/// Parse handler arguments; `--help` prints clap's help and counts as a help
/// request.
pub fn parse<T: Parser>(command: Command, args: &[String]) -> Result<T, RouterError> {
    let argv =
        std::iter::once(format!("lodestream {}", command.name())).chain(args.iter().cloned());
    T::try_parse_from(argv).map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            if let Err(err) = e.print() {
                warn!("cannot print help: {}", err);
            }
            RouterError::HelpRequested
        }
        _ => RouterError::Command(e.into()),
    })
}

/// Build the database whose config path matches `db_path`.
///
/// Both sides are compared as absolute paths after `~/` expansion.
pub fn open_db(config: &Config, db_path: &str) -> Result<Db> {
    let wanted = absolute(&expand_home(db_path, &ProcessHome)?)?;

    for dbc in &config.dbs {
        if absolute(&dbc.path)? == wanted {
            return Ok(new_db_from_config(dbc)?);
        }
    }
    Err(anyhow!("database not found in config: {}", wanted.display()))
}

/// Build every configured database, failing on the first invalid one
pub fn open_all(config: &Config) -> Result<Vec<Db>> {
    config
        .dbs
        .iter()
        .map(|dbc| {
            new_db_from_config(dbc)
                .with_context(|| format!("cannot initialize database {}", dbc.path))
        })
        .collect()
}

fn absolute(path: &str) -> Result<PathBuf> {
    std::path::absolute(Path::new(path)).with_context(|| format!("cannot resolve path {path}"))
}
