//! Lodestream command-line tool
//!
//! Replicates SQLite databases to local directories and S3 buckets as
//! described by a YAML config file.

use lodestream_cli::{Router, RouterError, exit_code};
use std::process::ExitCode;

/// Build version, overridable at compile time through `LODESTREAM_VERSION`
const VERSION: &str = match option_env!("LODESTREAM_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let router = Router::new(VERSION);

    let result = router.run(&args).await;
    match &result {
        Ok(()) | Err(RouterError::HelpRequested) => {}
        Err(e) => eprintln!("{e:#}"),
    }
    ExitCode::from(exit_code(&result))
}
