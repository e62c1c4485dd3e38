use super::{
    DEFAULT_RETENTION, DEFAULT_RETENTION_CHECK_INTERVAL, Replica, ReplicaKind, ReplicaState,
    ReplicaStatus,
};
use crate::db::Db;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Default time between uploads of buffered WAL
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(10);

/// Replica stored in an S3 bucket under a key prefix
///
/// Listing and restore need a network client and are left to the
/// replication engine.
pub struct S3Replica {
    db_path: PathBuf,
    name: String,
    state: ReplicaState,

    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    pub bucket: String,

    /// Key prefix inside the bucket
    pub path: String,

    pub retention: Duration,
    pub retention_check_interval: Duration,
    pub sync_interval: Duration,
}

impl S3Replica {
    /// New unconfigured replica of `db`; credentials and bucket are set by
    /// the caller
    pub fn new(db: &Db, name: Option<&str>) -> Self {
        Self {
            db_path: db.path().to_path_buf(),
            name: name
                .filter(|n| !n.is_empty())
                .unwrap_or(ReplicaKind::S3.as_str())
                .to_string(),
            state: ReplicaState::Idle,
            access_key_id: String::new(),
            secret_access_key: String::new(),
            region: String::new(),
            bucket: String::new(),
            path: String::new(),
            retention: DEFAULT_RETENTION,
            retention_check_interval: DEFAULT_RETENTION_CHECK_INTERVAL,
            sync_interval: DEFAULT_SYNC_INTERVAL,
        }
    }
}

impl fmt::Debug for S3Replica {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Replica")
            .field("db_path", &self.db_path)
            .field("name", &self.name)
            .field("state", &self.state)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("path", &self.path)
            .field("retention", &self.retention)
            .field("retention_check_interval", &self.retention_check_interval)
            .field("sync_interval", &self.sync_interval)
            .finish()
    }
}

impl Replica for S3Replica {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ReplicaKind {
        ReplicaKind::S3
    }

    fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn location(&self) -> String {
        if self.path.is_empty() {
            format!("s3://{}", self.bucket)
        } else {
            format!("s3://{}/{}", self.bucket, self.path)
        }
    }

    fn start(&mut self) {
        info!(
            db = %self.db_path.display(),
            replica = %self.name,
            bucket = %self.bucket,
            region = %self.region,
            "starting s3 replica"
        );
        self.state = ReplicaState::Running;
    }

    fn stop(&mut self) {
        if self.state == ReplicaState::Running {
            info!(db = %self.db_path.display(), replica = %self.name, "stopped s3 replica");
        }
        self.state = ReplicaState::Stopped;
    }

    fn status(&self) -> ReplicaStatus {
        ReplicaStatus {
            name: self.name.clone(),
            kind: ReplicaKind::S3,
            state: self.state,
            location: self.location(),
            retention: self.retention,
            retention_check_interval: self.retention_check_interval,
            sync_interval: Some(self.sync_interval),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replica::ReplicaError;

    #[test]
    fn test_location() {
        let db = Db::new("/data/app.db");
        let mut replica = S3Replica::new(&db, Some("offsite"));
        replica.bucket = "bucket".to_string();
        assert_eq!(replica.location(), "s3://bucket");

        replica.path = "app/db".to_string();
        assert_eq!(replica.location(), "s3://bucket/app/db");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let db = Db::new("/data/app.db");
        let mut replica = S3Replica::new(&db, None);
        replica.secret_access_key = "hunter2".to_string();

        let debug = format!("{:?}", replica);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_listing_is_left_to_engine() {
        let db = Db::new("/data/app.db");
        let replica = S3Replica::new(&db, None);

        assert_eq!(replica.name(), "s3");
        assert!(matches!(
            replica.generations(),
            Err(ReplicaError::Unsupported { kind: ReplicaKind::S3, .. })
        ));
    }
}
