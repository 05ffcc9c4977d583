//! Optional user configuration, read from `<config dir>/shahash/config.toml`
//!
//! ```toml
//! default_algorithm = "sha256"
//! buffer_size = 65536
//! clipboard = false
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Deserialize;

use crate::hash::{Algorithm, HashUtilityError, DEFAULT_BUFFER_SIZE, MAX_BUFFER_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Used when only a filename is given
    pub default_algorithm: Algorithm,
    /// Read chunk size in bytes
    pub buffer_size: usize,
    /// Copy the hash to the clipboard after printing it
    pub clipboard: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_algorithm: Algorithm::Md5,
            buffer_size: DEFAULT_BUFFER_SIZE,
            clipboard: true,
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("shahash").join("config.toml"))
    }

    /// Load the config at the default location.
    ///
    /// A missing file yields defaults. A malformed one is reported and ignored.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|e| {
            warn!("{}; using defaults", e);
            Self::default()
        })
    }

    /// Load an explicit config file; every failure is an error
    pub fn load_from(path: &Path) -> Result<Self, HashUtilityError> {
        let text = fs::read_to_string(path).map_err(|e| invalid(path, &e))?;
        let config = Self::parse(&text).map_err(|reason| HashUtilityError::InvalidConfig {
            path: path.to_path_buf(),
            reason,
        })?;
        debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, String> {
        let config: Config = toml::from_str(text).map_err(|e| e.message().to_string())?;
        if !(1..=MAX_BUFFER_SIZE).contains(&config.buffer_size) {
            return Err(format!(
                "buffer_size must be between 1 and {}",
                MAX_BUFFER_SIZE
            ));
        }
        Ok(config)
    }
}

fn invalid(path: &Path, err: &io::Error) -> HashUtilityError {
    HashUtilityError::InvalidConfig {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}
