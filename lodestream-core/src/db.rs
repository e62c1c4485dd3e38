use crate::replica::Replica;
use std::path::{Path, PathBuf};

/// Handle to a managed database and the replicas attached to it
///
/// The handle owns its replicas; they are kept in configuration order.
#[derive(Debug)]
pub struct Db {
    path: PathBuf,
    replicas: Vec<Box<dyn Replica>>,
}

impl Db {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            replicas: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn replicas(&self) -> &[Box<dyn Replica>] {
        &self.replicas
    }

    pub fn push_replica(&mut self, replica: Box<dyn Replica>) {
        self.replicas.push(replica);
    }

    /// First replica with the given name
    pub fn replica(&self, name: &str) -> Option<&dyn Replica> {
        self.replicas
            .iter()
            .find(|r| r.name() == name)
            .map(|r| r.as_ref())
    }

    pub fn start_replicas(&mut self) {
        for replica in &mut self.replicas {
            replica.start();
        }
    }

    pub fn stop_replicas(&mut self) {
        for replica in &mut self.replicas {
            replica.stop();
        }
    }
}
