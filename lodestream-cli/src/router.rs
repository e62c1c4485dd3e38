//! Routes the first command-line argument to a subcommand handler.

use crate::commands;
use thiserror::Error;

const USAGE: &str = "\
lodestream is a tool for replicating SQLite databases.

Usage:

\tlodestream <command> [arguments]

The commands are:

\tdatabases    list databases specified in config file
\tgenerations  list available generations for a database
\treplicate    runs a server to replicate databases
\trestore      recovers database backup from a replica
\tsnapshots    list available snapshots for a database
\tvalidate     checks the config file and builds every replica
\tversion      prints the version
\twal          list available WAL files for a database
";

/// Subcommands, a closed set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Databases,
    Generations,
    Replicate,
    Restore,
    Snapshots,
    Validate,
    Version,
    Wal,
}

impl Command {
    pub const ALL: [Command; 8] = [
        Self::Databases,
        Self::Generations,
        Self::Replicate,
        Self::Restore,
        Self::Snapshots,
        Self::Validate,
        Self::Version,
        Self::Wal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Databases => "databases",
            Self::Generations => "generations",
            Self::Replicate => "replicate",
            Self::Restore => "restore",
            Self::Snapshots => "snapshots",
            Self::Validate => "validate",
            Self::Version => "version",
            Self::Wal => "wal",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// Routing and handler errors
#[derive(Debug, Error)]
pub enum RouterError {
    /// Usage was printed; not a failure, but the process still exits 1
    #[error("help requested")]
    HelpRequested,

    #[error("lodestream {0}: unknown command")]
    UnknownCommand(String),

    #[error(transparent)]
    Command(#[from] anyhow::Error),
}

/// Process exit status for a finished run: 0 on success, 1 for help and for
/// every error
pub fn exit_code(result: &Result<(), RouterError>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

/// Dispatches invocations to subcommand handlers
#[derive(Debug, Clone)]
pub struct Router {
    version: String,
}

impl Router {
    /// `version` is reported by the `version` subcommand
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Select the subcommand named by the first argument. The remaining
    /// arguments are returned untouched.
    pub fn route<'a>(&self, args: &'a [String]) -> Result<(Command, &'a [String]), RouterError> {
        let Some((name, rest)) = args.split_first() else {
            return Err(RouterError::HelpRequested);
        };

        if let Some(command) = Command::from_name(name) {
            return Ok((command, rest));
        }

        if name.is_empty() || name == "help" || name.starts_with('-') {
            return Err(RouterError::HelpRequested);
        }
        Err(RouterError::UnknownCommand(name.clone()))
    }

    /// Route and run. Usage is printed when help is requested.
    pub async fn run(&self, args: &[String]) -> Result<(), RouterError> {
        let (command, rest) = match self.route(args) {
            Ok(routed) => routed,
            Err(RouterError::HelpRequested) => {
                Self::usage();
                return Err(RouterError::HelpRequested);
            }
            Err(e) => return Err(e),
        };

        match command {
            Command::Databases => commands::databases::run(rest),
            Command::Generations => commands::generations::run(rest),
            Command::Replicate => commands::replicate::run(rest).await,
            Command::Restore => commands::restore::run(rest),
            Command::Snapshots => commands::snapshots::run(rest),
            Command::Validate => commands::validate::run(rest),
            Command::Version => commands::version::run(rest, &self.version),
            Command::Wal => commands::wal::run(rest),
        }
    }

    pub fn usage() {
        println!("{USAGE}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_route_every_command() {
        let router = Router::new("test");
        for command in Command::ALL {
            let argv = args(&[command.name(), "--config", "/tmp/x.yml"]);
            let (routed, rest) = router.route(&argv).unwrap();
            assert_eq!(routed, command);
            assert_eq!(rest, &argv[1..]);
        }
    }

    #[test]
    fn test_help_requested() {
        let router = Router::new("test");
        for argv in [args(&[]), args(&["help"]), args(&["-h"]), args(&["--config"]), args(&[""])] {
            assert!(
                matches!(router.route(&argv), Err(RouterError::HelpRequested)),
                "{argv:?}"
            );
        }
    }

    #[test]
    fn test_unknown_command() {
        let router = Router::new("test");
        let err = router.route(&args(&["bogus", "x"])).unwrap_err();
        assert!(matches!(&err, RouterError::UnknownCommand(c) if c == "bogus"));
        assert_eq!(err.to_string(), "lodestream bogus: unknown command");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&Ok(())), 0);
        assert_eq!(exit_code(&Err(RouterError::HelpRequested)), 1);
        assert_eq!(exit_code(&Err(RouterError::UnknownCommand("bogus".into()))), 1);
        assert_eq!(exit_code(&Err(anyhow::anyhow!("boom").into())), 1);
    }

    #[test]
    fn test_command_names_are_unique() {
        for command in Command::ALL {
            assert_eq!(Command::from_name(command.name()), Some(command));
        }
        assert_eq!(Command::from_name("Databases"), None);
    }
}
