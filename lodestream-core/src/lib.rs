//! Lodestream core: configuration resolution and replica construction.
//!
//! ```text
//! YAML file ─► ConfigLoader ─► Config (normalized) ─► factory ─► Db + replicas
//!                   │                                              │
//!                   └─ ReplicaConfig::normalize per replica        └─ handed to the
//!                      (~/ expansion, file:// and s3:// URLs)         replication engine
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod factory;
pub mod replica;

// Re-export commonly used types
pub use config::path::{HomeDir, ProcessHome};
pub use config::{Config, ConfigLoader, DbConfig, ReplicaConfig, default_config_path};
pub use db::Db;
pub use error::{ConfigError, LoadError, Result};
pub use factory::{new_db_from_config, new_replica_from_config};
pub use replica::{
    FileReplica, Replica, ReplicaError, ReplicaKind, ReplicaState, ReplicaStatus, S3Replica,
};
