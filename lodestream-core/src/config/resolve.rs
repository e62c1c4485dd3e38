//! Replica path resolution.
//!
//! A replica `path` may be written as a URL so a single value carries the
//! whole destination:
//!
//! | Path                            | type | path          | extracted            |
//! |---------------------------------|------|---------------|----------------------|
//! | `/var/backups/db`               | -    | unchanged     | -                    |
//! | `file:///var/backups/../db`     | file | `/var/db`     | -                    |
//! | `file://backups/db`             | file | `/backups/db` | -                    |
//! | `file:relative/db`              | file | `relative/db` | -                    |
//! | `s3://id:secret@bucket/sub/dir` | s3   | `sub/dir`     | bucket, credentials  |
//! | `s3://bucket:9000/sub`          | s3   | `sub`         | bucket `bucket:9000` |

use super::ReplicaConfig;
use super::path::{self, HomeDir};
use crate::error::{ConfigError, Result};
use crate::replica::ReplicaKind;
use percent_encoding::percent_decode_str;
use tracing::debug;
use url::Url;

impl ReplicaConfig {
    /// Expand `~/` in the path, then decompose URL-form paths into typed
    /// fields.
    ///
    /// Paths that do not parse as a URL with a scheme are plain filesystem
    /// paths and leave every other field untouched. Normalizing twice gives
    /// the same result as normalizing once.
    pub fn normalize(&mut self, home: &dyn HomeDir) -> Result<()> {
        self.path = path::expand_home(&self.path, home)?;

        let Ok(url) = Url::parse(&self.path) else {
            return Ok(());
        };

        match url.scheme() {
            "file" => {
                self.replica_type = Some(ReplicaKind::File.as_str().to_string());
                self.path = file_path(&self.path, &url);
            }
            "s3" => {
                self.replica_type = Some(ReplicaKind::S3.as_str().to_string());
                self.bucket = match (url.host_str().unwrap_or_default(), url.port()) {
                    (host, Some(port)) => format!("{host}:{port}"),
                    (host, None) => host.to_string(),
                };
                self.path = sub_path(url.path());

                if !url.username().is_empty() || url.password().is_some() {
                    self.access_key_id = decode(url.username());
                    self.secret_access_key = url.password().map(decode).unwrap_or_default();
                }
            }
            _ => return Err(ConfigError::UnrecognizedReplicaScheme(self.path.clone())),
        }

        debug!(
            replica_type = self.replica_type.as_deref().unwrap_or_default(),
            path = %self.path,
            bucket = %self.bucket,
            "resolved replica url"
        );
        Ok(())
    }
}

/// Local path of a `file` URL with the scheme stripped. A host is kept as
/// the first path element and an opaque `file:rel` path stays relative.
fn file_path(raw: &str, url: &Url) -> String {
    let rest = raw.split_once(':').map_or(url.path(), |(_, rest)| rest);
    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    path::clean(&decode(rest))
}

/// Object-store prefix from a URL path: cleaned, without a leading separator
fn sub_path(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let cleaned = path::clean(&decode(raw));
    cleaned
        .strip_prefix('/')
        .unwrap_or(&cleaned)
        .to_string()
}

fn decode(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}
