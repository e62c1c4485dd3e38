//! Builds database handles and replicas from normalized configuration.

use crate::config::{DbConfig, ReplicaConfig};
use crate::db::Db;
use crate::error::{ConfigError, Result};
use crate::replica::{FileReplica, Replica, ReplicaKind, S3Replica};
use tracing::debug;

/// Instantiate a database handle with every configured replica attached.
pub fn new_db_from_config(config: &DbConfig) -> Result<Db> {
    let mut db = Db::new(&config.path);

    for (i, rconfig) in config.replicas.iter().enumerate() {
        let replica =
            new_replica_from_config(&db, rconfig).map_err(|e| e.within(format!("replicas[{i}]")))?;
        db.push_replica(replica);
    }

    Ok(db)
}

/// Instantiate a replica for `db` based on its config
pub fn new_replica_from_config(db: &Db, config: &ReplicaConfig) -> Result<Box<dyn Replica>> {
    let kind: ReplicaKind = config.replica_type.as_deref().unwrap_or_default().parse()?;

    let replica: Box<dyn Replica> = match kind {
        ReplicaKind::File => Box::new(new_file_replica_from_config(db, config)?),
        ReplicaKind::S3 => Box::new(new_s3_replica_from_config(db, config)?),
    };

    debug!(
        db = %db.path().display(),
        replica = replica.name(),
        kind = %kind,
        location = %replica.location(),
        "built replica"
    );
    Ok(replica)
}

/// File replica; durations left unset keep the backend defaults
pub fn new_file_replica_from_config(db: &Db, config: &ReplicaConfig) -> Result<FileReplica> {
    if config.path.is_empty() {
        return Err(ConfigError::MissingReplicaPath {
            db: db_name(db),
        });
    }

    let mut r = FileReplica::new(db, config.name.as_deref(), &config.path);
    if let Some(v) = config.retention {
        r.retention = v;
    }
    if let Some(v) = config.retention_check_interval {
        r.retention_check_interval = v;
    }
    Ok(r)
}

/// S3 replica; credentials, region and bucket are required, checked in that
/// order
pub fn new_s3_replica_from_config(db: &Db, config: &ReplicaConfig) -> Result<S3Replica> {
    let required = [
        ("access-key-id", &config.access_key_id),
        ("secret-access-key", &config.secret_access_key),
        ("region", &config.region),
        ("bucket", &config.bucket),
    ];
    if let Some((field, _)) = required.iter().find(|(_, value)| value.is_empty()) {
        return Err(ConfigError::MissingRequiredField {
            db: db_name(db),
            field: *field,
        });
    }

    let mut r = S3Replica::new(db, config.name.as_deref());
    r.access_key_id = config.access_key_id.clone();
    r.secret_access_key = config.secret_access_key.clone();
    r.region = config.region.clone();
    r.bucket = config.bucket.clone();
    r.path = config.path.clone();

    if let Some(v) = config.retention {
        r.retention = v;
    }
    if let Some(v) = config.retention_check_interval {
        r.retention_check_interval = v;
    }
    if let Some(v) = config.sync_interval {
        r.sync_interval = v;
    }
    Ok(r)
}

fn db_name(db: &Db) -> String {
    db.path().display().to_string()
}
