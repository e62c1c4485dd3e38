use super::Config;
use super::path::{self, HomeDir, ProcessHome};
use crate::error::{ConfigError, LoadError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable overriding the default config path
pub const CONFIG_ENV: &str = "LODESTREAM_CONFIG";

/// Config path used when `LODESTREAM_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "/etc/lodestream.yml";

/// Default config path: `$LODESTREAM_CONFIG`, or `/etc/lodestream.yml`
pub fn default_config_path() -> PathBuf {
    match std::env::var_os(CONFIG_ENV) {
        Some(v) if !v.is_empty() => PathBuf::from(v),
        _ => PathBuf::from(DEFAULT_CONFIG_PATH),
    }
}

/// Reads, decodes and normalizes config files
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader<H = ProcessHome> {
    home: H,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { home: ProcessHome }
    }
}

impl<H: HomeDir> ConfigLoader<H> {
    /// Loader resolving `~/` against a custom home directory source
    pub fn with_home(home: H) -> Self {
        Self { home }
    }

    /// Load configuration from a YAML file.
    ///
    /// The file name itself may start with `~/`. Keys missing from the
    /// document keep their defaults. Every database and replica is
    /// normalized; the first failure aborts the load.
    pub fn load(&self, filename: impl AsRef<Path>) -> Result<Config, LoadError> {
        let config = Config::default();
        let filename = filename.as_ref();

        let path = match filename.to_str() {
            Some(s) => match path::expand_home(s, &self.home) {
                Ok(expanded) => PathBuf::from(expanded),
                Err(e) => return Err(LoadError::new(config, e)),
            },
            None => filename.to_path_buf(),
        };

        let buf = match fs::read(&path) {
            Ok(buf) => buf,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LoadError::new(config, ConfigError::ConfigNotFound(path)));
            }
            Err(source) => {
                return Err(LoadError::new(
                    config,
                    ConfigError::ConfigReadError { path, source },
                ));
            }
        };

        debug!(path = %path.display(), bytes = buf.len(), "read config file");
        self.parse(&path, &buf)
    }

    /// Decode and normalize an in-memory document. `origin` is only used in
    /// error messages.
    pub fn parse(&self, origin: &Path, buf: &[u8]) -> Result<Config, LoadError> {
        let mut config = if buf.iter().all(u8::is_ascii_whitespace) {
            Config::default()
        } else {
            match serde_yaml::from_slice::<Config>(buf) {
                Ok(config) => config,
                Err(source) => {
                    return Err(LoadError::new(
                        Config::default(),
                        ConfigError::ConfigDecodeError {
                            path: origin.to_path_buf(),
                            source,
                        },
                    ));
                }
            }
        };

        if let Err(e) = config.normalize(&self.home) {
            return Err(LoadError::new(config, e));
        }

        info!(
            path = %origin.display(),
            databases = config.dbs.len(),
            "loaded configuration"
        );
        Ok(config)
    }
}
