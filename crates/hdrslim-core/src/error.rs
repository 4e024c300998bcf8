//! Error types for hdrslim

use std::path::PathBuf;
use thiserror::Error;

/// hdrslim error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot copy {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}

/// Result type alias for hdrslim
pub type Result<T> = std::result::Result<T, Error>;
