// Centralized error handling module
// Every failure a hash run can hit, classified so the CLI decides presentation

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the hash utility
#[derive(Debug, Error)]
pub enum HashUtilityError {
    /// Algorithm token outside the supported set
    #[error("unsupported hash algorithm: {algorithm}")]
    UnsupportedAlgorithm { algorithm: String },

    /// Path missing, or not a regular file
    #[error("{} could not be found.", path.display())]
    FileNotFound { path: PathBuf },

    /// File exists but could not be read, at open time or mid-stream
    #[error("{} could not be processed: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {}: {reason}", path.display())]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("clipboard unavailable: {reason}")]
    ClipboardUnavailable { reason: String },
}

impl HashUtilityError {
    /// Classify an io::Error raised while opening or reading `path`
    pub fn from_io_error(err: io::Error, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::NotFound => HashUtilityError::FileNotFound { path },
            _ => HashUtilityError::FileUnreadable { path, source: err },
        }
    }
}
