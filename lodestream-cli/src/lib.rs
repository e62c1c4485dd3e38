//! Command-line front end: routes `lodestream <command> [arguments]` to the
//! subcommand handlers.

pub mod commands;
pub mod router;

pub use router::{Command, Router, RouterError, exit_code};
