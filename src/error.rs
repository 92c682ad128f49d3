//! Error types for the decryption pipeline.

use std::path::PathBuf;

use thiserror::Error;

use crate::secrets::reference::ReferenceError;
use crate::secrets::types::ResolveError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Every way a run can fail. All of them are fatal: nothing is written
/// unless the whole document resolved.
#[derive(Debug, Error)]
pub enum Error {
    /// The input document does not exist.
    #[error("secrets file '{}' does not exist", .path.display())]
    InputMissing { path: PathBuf },

    /// The input path names a directory.
    #[error("secrets file '{}' is a directory", .path.display())]
    InputIsDirectory { path: PathBuf },

    /// The input document exceeds the size guardrail.
    #[error("secrets file '{}' is {size} bytes, exceeds limit of {limit} bytes", .path.display())]
    InputTooLarge { path: PathBuf, size: u64, limit: u64 },

    /// The input document could not be read.
    #[error("failed to read '{}'", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input document is not valid YAML.
    #[error("failed to parse '{}' as YAML", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A `gsm:` value does not match the reference grammar.
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// The backend could not produce a value for a reference.
    #[error("failed to resolve '{address}' at '{config_path}'")]
    Resolution {
        config_path: String,
        address: String,
        #[source]
        source: ResolveError,
    },

    /// The resolved document could not be serialized.
    #[error("failed to serialize decrypted document")]
    Serialize(#[source] serde_yaml::Error),

    /// The output document could not be written.
    #[error("failed to write '{}'", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backend HTTP client could not be constructed.
    #[error("failed to build Secret Manager client")]
    Client(#[source] reqwest::Error),

    /// A configuration value was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
