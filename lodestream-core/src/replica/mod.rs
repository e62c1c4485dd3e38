//! Replica backends.
//!
//! A replica is a destination a database's changes are continuously copied
//! to. This crate only constructs and configures replicas; shipping WAL,
//! snapshotting and enforcing retention belong to the replication engine,
//! which drives replicas through the [`Replica`] trait.

pub mod file;
pub mod s3;

pub use file::FileReplica;
pub use s3::S3Replica;

use crate::error::ConfigError;
use std::fmt;
use std::io;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default time historical data is kept before it may be removed
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(24 * 60 * 60);

/// Default time between retention enforcement passes
pub const DEFAULT_RETENTION_CHECK_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Supported replica backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplicaKind {
    File,
    S3,
}

impl ReplicaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::S3 => "s3",
        }
    }
}

impl fmt::Display for ReplicaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReplicaKind {
    type Err = ConfigError;

    /// An empty string is the unset type and means `file`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "file" => Ok(Self::File),
            "s3" => Ok(Self::S3),
            other => Err(ConfigError::UnknownReplicaType(other.to_string())),
        }
    }
}

/// Lifecycle state of a replica
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplicaState {
    #[default]
    Idle,
    Running,
    Stopped,
}

/// Point-in-time view of a replica's configuration and state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicaStatus {
    pub name: String,
    pub kind: ReplicaKind,
    pub state: ReplicaState,
    pub location: String,
    pub retention: Duration,
    pub retention_check_interval: Duration,
    /// s3 only
    pub sync_interval: Option<Duration>,
}

/// Replica operation errors
#[derive(Debug, Error)]
pub enum ReplicaError {
    #[error("{kind} replica {name:?}: {operation} is provided by the replication engine")]
    Unsupported {
        kind: ReplicaKind,
        name: String,
        operation: &'static str,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl ReplicaError {
    fn unsupported(kind: ReplicaKind, name: &str, operation: &'static str) -> Self {
        Self::Unsupported {
            kind,
            name: name.to_string(),
            operation,
        }
    }
}

/// Capability shared by every replica backend
///
/// Listing and restore default to [`ReplicaError::Unsupported`]; backends
/// override what they can answer locally.
pub trait Replica: fmt::Debug + Send + Sync {
    /// Display name; falls back to the backend kind when unnamed
    fn name(&self) -> &str;

    fn kind(&self) -> ReplicaKind;

    /// Path of the database this replica copies
    fn db_path(&self) -> &Path;

    /// Human-readable destination, e.g. a directory or `s3://bucket/prefix`
    fn location(&self) -> String;

    fn start(&mut self);

    fn stop(&mut self);

    fn status(&self) -> ReplicaStatus;

    /// Generation identifiers, oldest first
    fn generations(&self) -> Result<Vec<String>, ReplicaError> {
        Err(ReplicaError::unsupported(self.kind(), self.name(), "generation listing"))
    }

    fn snapshots(&self, generation: &str) -> Result<Vec<String>, ReplicaError> {
        let _ = generation;
        Err(ReplicaError::unsupported(self.kind(), self.name(), "snapshot listing"))
    }

    fn wal_segments(&self, generation: &str) -> Result<Vec<String>, ReplicaError> {
        let _ = generation;
        Err(ReplicaError::unsupported(self.kind(), self.name(), "WAL listing"))
    }

    /// Rebuild the database at `output` from this replica
    fn restore(&self, output: &Path) -> Result<(), ReplicaError> {
        let _ = output;
        Err(ReplicaError::unsupported(self.kind(), self.name(), "restore"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("".parse::<ReplicaKind>().unwrap(), ReplicaKind::File);
        assert_eq!("file".parse::<ReplicaKind>().unwrap(), ReplicaKind::File);
        assert_eq!("s3".parse::<ReplicaKind>().unwrap(), ReplicaKind::S3);

        let err = "gcs".parse::<ReplicaKind>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownReplicaType(t) if t == "gcs"));
    }

    #[test]
    fn test_kind_display_round_trips() {
        for kind in [ReplicaKind::File, ReplicaKind::S3] {
            assert_eq!(kind.to_string().parse::<ReplicaKind>().unwrap(), kind);
        }
    }
}
