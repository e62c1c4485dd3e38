//! Configuration document for the replication daemon.
//!
//! A config file lists databases and, for each, the replicas its changes are
//! shipped to. Replica paths accept a shorthand URL form which is expanded
//! during normalization:
//!
//! ```yaml
//! addr: ":9090"
//! dbs:
//!   - path: /var/lib/app/app.db
//!     replicas:
//!       - path: ~/backups/app
//!         retention: 72h
//!       - path: s3://AKIDEXAMPLE:secret@my-bucket/app
//!         region: us-east-1
//!         sync-interval: 1s
//! ```

pub mod loader;
pub mod path;
pub mod resolve;

use crate::error::Result;
use path::HomeDir;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

pub use loader::{CONFIG_ENV, ConfigLoader, DEFAULT_CONFIG_PATH, default_config_path};

/// Default bind address for serving metrics
pub const DEFAULT_ADDR: &str = ":9090";

/// Root configuration document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bind address for serving metrics
    pub addr: String,

    /// Databases to manage
    pub dbs: Vec<DbConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            dbs: Vec::new(),
        }
    }
}

impl Config {
    /// Normalize every database and replica, stopping at the first failure.
    ///
    /// Errors carry a breadcrumb (`dbs[i]` or `dbs[i].replicas[j]`).
    pub fn normalize(&mut self, home: &dyn HomeDir) -> Result<()> {
        for (i, db) in self.dbs.iter_mut().enumerate() {
            db.normalize(home).map_err(|e| e.within(format!("dbs[{i}]")))?;
        }
        Ok(())
    }

    /// First database whose path matches exactly
    pub fn db_config(&self, path: impl AsRef<Path>) -> Option<&DbConfig> {
        let path = path.as_ref();
        self.dbs.iter().find(|db| Path::new(&db.path) == path)
    }
}

/// One managed database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    pub path: String,
    pub replicas: Vec<ReplicaConfig>,
}

impl DbConfig {
    pub fn normalize(&mut self, home: &dyn HomeDir) -> Result<()> {
        self.path = path::expand_home(&self.path, home)?;

        for (i, replica) in self.replicas.iter_mut().enumerate() {
            replica
                .normalize(home)
                .map_err(|e| e.within(format!("replicas[{i}]")))?;
        }

        debug!(db = %self.path, replicas = self.replicas.len(), "normalized database config");
        Ok(())
    }
}

/// One replication destination
///
/// `replica_type` keeps the raw string from the document; it is mapped to a
/// [`ReplicaKind`](crate::replica::ReplicaKind) when the replica is built.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ReplicaConfig {
    /// "file" (or unset) or "s3"
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub replica_type: Option<String>,

    /// Display label, optional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Destination directory (file) or key prefix (s3)
    pub path: String,

    #[serde(with = "duration", skip_serializing_if = "Option::is_none")]
    pub retention: Option<Duration>,

    #[serde(with = "duration", skip_serializing_if = "Option::is_none")]
    pub retention_check_interval: Option<Duration>,

    /// s3 only
    #[serde(with = "duration", skip_serializing_if = "Option::is_none")]
    pub sync_interval: Option<Duration>,

    // S3 settings
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    pub bucket: String,
}

impl fmt::Debug for ReplicaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplicaConfig")
            .field("replica_type", &self.replica_type)
            .field("name", &self.name)
            .field("path", &self.path)
            .field("retention", &self.retention)
            .field("retention_check_interval", &self.retention_check_interval)
            .field("sync_interval", &self.sync_interval)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .finish()
    }
}

/// Optional durations in humantime syntax (`24h`, `90s`, `1h 30m`).
///
/// A zero duration decodes to `None`: zero means "keep the backend
/// default", never "zero".
mod duration {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(d) => serializer.serialize_str(&humantime::format_duration(*d).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(s) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let d = humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)?;
        Ok((!d.is_zero()).then_some(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(yaml: &str) -> Config {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.addr, ":9090");
        assert!(config.dbs.is_empty());
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let config = decode("dbs:\n  - path: /tmp/a.db\n");
        assert_eq!(config.addr, DEFAULT_ADDR);
        assert_eq!(config.dbs.len(), 1);
        assert!(config.dbs[0].replicas.is_empty());
    }

    #[test]
    fn test_replica_fields_use_kebab_case() {
        let config = decode(
            r#"
addr: "127.0.0.1:9191"
dbs:
  - path: /tmp/a.db
    replicas:
      - type: s3
        name: offsite
        path: backups/a
        retention: 24h
        retention-check-interval: 30m
        sync-interval: 5s
        access-key-id: AKID
        secret-access-key: SECRET
        region: eu-west-1
        bucket: my-bucket
"#,
        );

        assert_eq!(config.addr, "127.0.0.1:9191");
        let r = &config.dbs[0].replicas[0];
        assert_eq!(r.replica_type.as_deref(), Some("s3"));
        assert_eq!(r.name.as_deref(), Some("offsite"));
        assert_eq!(r.retention, Some(Duration::from_secs(24 * 3600)));
        assert_eq!(r.retention_check_interval, Some(Duration::from_secs(1800)));
        assert_eq!(r.sync_interval, Some(Duration::from_secs(5)));
        assert_eq!(r.access_key_id, "AKID");
        assert_eq!(r.secret_access_key, "SECRET");
        assert_eq!(r.region, "eu-west-1");
        assert_eq!(r.bucket, "my-bucket");
    }

    #[test]
    fn test_debug_redacts_secret_access_key() {
        let config = decode(
            "dbs:\n  - path: /a.db\n    replicas:\n      - type: s3\n        secret-access-key: SECRET\n",
        );

        let out = format!("{config:?}");
        assert!(!out.contains("SECRET"), "{out}");
        assert!(out.contains("secret_access_key: \"<redacted>\""));
    }

    #[test]
    fn test_zero_duration_is_unset() {
        let config = decode(
            "dbs:\n  - path: /a.db\n    replicas:\n      - path: /b\n        retention: 0s\n",
        );
        assert_eq!(config.dbs[0].replicas[0].retention, None);
    }

    #[test]
    fn test_bad_duration_is_decode_error() {
        let result: std::result::Result<Config, _> = serde_yaml::from_str(
            "dbs:\n  - path: /a.db\n    replicas:\n      - path: /b\n        retention: forever\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_db_config_lookup() {
        let config = decode("dbs:\n  - path: /a.db\n  - path: /b.db\n");
        assert_eq!(config.db_config("/b.db").map(|db| db.path.as_str()), Some("/b.db"));
        assert!(config.db_config("/c.db").is_none());
    }
}
