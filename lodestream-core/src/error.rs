use crate::config::Config;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, normalizing or instantiating configuration
///
/// Variants that wrap an I/O or decode failure keep it as the error source,
/// so `{:#}` formatting (anyhow) prints the full chain. A located error
/// prints its breadcrumb followed by the inner message.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("cannot read config file {}", .path.display())]
    ConfigReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot decode config file {}", .path.display())]
    ConfigDecodeError {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("cannot expand {0}: home directory unavailable")]
    HomeDirectoryUnavailable(String),

    #[error("unrecognized replica type in path scheme: {0}")]
    UnrecognizedReplicaScheme(String),

    #[error("{db}: file replica path required")]
    MissingReplicaPath { db: String },

    #[error("{db}: s3 {field} required")]
    MissingRequiredField { db: String, field: &'static str },

    #[error("unknown replica type in config: {0:?}")]
    UnknownReplicaType(String),

    /// Failure inside the document, located by a breadcrumb such as
    /// `dbs[1].replicas[0]`
    #[error("{at}: {error}")]
    Invalid { at: String, error: Box<ConfigError> },
}

impl ConfigError {
    /// Prefix the breadcrumb with an enclosing segment, wrapping the error if
    /// it has no location yet.
    pub fn within(self, segment: impl fmt::Display) -> Self {
        match self {
            Self::Invalid { at, error } => Self::Invalid {
                at: format!("{segment}.{at}"),
                error,
            },
            other => Self::Invalid {
                at: segment.to_string(),
                error: Box::new(other),
            },
        }
    }

    /// Breadcrumb of the failing element, if the error was raised inside the
    /// document
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Invalid { at, .. } => Some(at),
            _ => None,
        }
    }

    /// Innermost error with breadcrumbs stripped
    pub fn root(&self) -> &ConfigError {
        match self {
            Self::Invalid { error, .. } => error.root(),
            other => other,
        }
    }
}

/// Failed load, carrying the partially-defaulted config that was built
/// before the failure
///
/// The partial config is best-effort and must not be treated as
/// authoritative.
#[derive(Debug)]
pub struct LoadError {
    partial: Box<Config>,
    error: ConfigError,
}

impl LoadError {
    pub(crate) fn new(partial: Config, error: ConfigError) -> Self {
        Self {
            partial: Box::new(partial),
            error,
        }
    }

    pub fn error(&self) -> &ConfigError {
        &self.error
    }

    pub fn partial(&self) -> &Config {
        &self.partial
    }

    pub fn into_error(self) -> ConfigError {
        self.error
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.error)
    }
}

impl From<LoadError> for ConfigError {
    fn from(e: LoadError) -> Self {
        e.error
    }
}

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
