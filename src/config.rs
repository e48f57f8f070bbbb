//! Environment configuration and storage bootstrap.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `DATA_DIR` | `/data` | data root; records land in `DATA_DIR/received` |
//! | `HOST` | `0.0.0.0` | bind host |
//! | `PORT` | `5000` | bind port |

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

pub const DEFAULT_DATA_DIR: &str = "/data";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

/// Subdirectory of the data root that holds storage entries.
pub const RECEIVED_DIR: &str = "received";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT {value:?}: expected an integer between 0 and 65535")]
    InvalidPort { value: String },
    #[error("failed to create storage directory {}: {source}", path.display())]
    Bootstrap {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup. Empty values
    /// fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let port = match var("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort { value })?,
            None => defaults.port,
        };

        Ok(Self {
            data_dir: var("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            host: var("HOST").unwrap_or(defaults.host),
            port,
        })
    }

    /// Directory that holds `user_<id>.json` entries.
    pub fn received_dir(&self) -> PathBuf {
        self.data_dir.join(RECEIVED_DIR)
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Create the storage directory if needed. Run once before serving.
pub fn bootstrap_storage(config: &Config) -> Result<PathBuf, ConfigError> {
    let dir = config.received_dir();
    ensure_dir(&dir)?;
    info!(dir = %dir.display(), "Storage directory ready");
    Ok(dir)
}

fn ensure_dir(dir: &Path) -> Result<(), ConfigError> {
    std::fs::create_dir_all(dir).map_err(|source| ConfigError::Bootstrap {
        path: dir.to_path_buf(),
        source,
    })
}
