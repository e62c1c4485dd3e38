use super::{
    DEFAULT_RETENTION, DEFAULT_RETENTION_CHECK_INTERVAL, Replica, ReplicaError, ReplicaKind,
    ReplicaState, ReplicaStatus,
};
use crate::db::Db;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Replica stored in a local directory
///
/// Layout under the root directory:
///
/// ```text
/// <root>/generations/<generation>/snapshots/<snapshot>
/// <root>/generations/<generation>/wal/<segment>
/// ```
#[derive(Debug)]
pub struct FileReplica {
    db_path: PathBuf,
    name: String,
    dst: PathBuf,
    state: ReplicaState,

    /// Time history is kept before it may be removed
    pub retention: Duration,

    /// Time between retention enforcement passes
    pub retention_check_interval: Duration,
}

impl FileReplica {
    /// New replica of `db` writing under `dst`, with default retention
    pub fn new(db: &Db, name: Option<&str>, dst: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db.path().to_path_buf(),
            name: name
                .filter(|n| !n.is_empty())
                .unwrap_or(ReplicaKind::File.as_str())
                .to_string(),
            dst: dst.into(),
            state: ReplicaState::Idle,
            retention: DEFAULT_RETENTION,
            retention_check_interval: DEFAULT_RETENTION_CHECK_INTERVAL,
        }
    }

    /// Root directory of the replica
    pub fn path(&self) -> &Path {
        &self.dst
    }

    fn generations_dir(&self) -> PathBuf {
        self.dst.join("generations")
    }
}

impl Replica for FileReplica {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ReplicaKind {
        ReplicaKind::File
    }

    fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn location(&self) -> String {
        self.dst.display().to_string()
    }

    fn start(&mut self) {
        info!(
            db = %self.db_path.display(),
            replica = %self.name,
            dst = %self.dst.display(),
            "starting file replica"
        );
        self.state = ReplicaState::Running;
    }

    fn stop(&mut self) {
        if self.state == ReplicaState::Running {
            info!(db = %self.db_path.display(), replica = %self.name, "stopped file replica");
        }
        self.state = ReplicaState::Stopped;
    }

    fn status(&self) -> ReplicaStatus {
        ReplicaStatus {
            name: self.name.clone(),
            kind: ReplicaKind::File,
            state: self.state,
            location: self.location(),
            retention: self.retention,
            retention_check_interval: self.retention_check_interval,
            sync_interval: None,
        }
    }

    fn generations(&self) -> Result<Vec<String>, ReplicaError> {
        list_entries(&self.generations_dir(), EntryKind::Dir)
    }

    fn snapshots(&self, generation: &str) -> Result<Vec<String>, ReplicaError> {
        list_entries(
            &self.generations_dir().join(generation).join("snapshots"),
            EntryKind::File,
        )
    }

    fn wal_segments(&self, generation: &str) -> Result<Vec<String>, ReplicaError> {
        list_entries(
            &self.generations_dir().join(generation).join("wal"),
            EntryKind::File,
        )
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Dir,
    File,
}

/// Sorted entry names of one kind; a missing directory lists as empty
fn list_entries(dir: &Path, kind: EntryKind) -> Result<Vec<String>, ReplicaError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        let is_dir = entry.file_type()?.is_dir();
        if is_dir == (kind == EntryKind::Dir) {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}
