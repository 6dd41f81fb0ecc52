use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error)]
pub enum PomoError {
    #[error("--{flag} must be a positive number of minutes, got {value}")]
    InvalidDuration { flag: &'static str, value: f64 },

    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to listen for Ctrl+C: {0}")]
    Signal(#[source] io::Error),
}

// `main` returns these through `Box<dyn Error>`, which prints with Debug.
impl fmt::Debug for PomoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

pub type Result<T> = std::result::Result<T, PomoError>;
