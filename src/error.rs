//! Error types for configuration loading and persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the configuration engine.
///
/// Lookup misses and schema-validation failures are deliberately not part of
/// this enum: `get` reports absence through `Option` and `validate` through
/// its boolean return, so only structural failures (I/O, malformed files,
/// conflicting writes) reach the caller as errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the configuration file failed.
    #[error("config I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but is not valid YAML, or its root is
    /// not a mapping. Fatal on load and reload; a merely missing file is not.
    #[error("failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Serializing the in-memory tree for save or export failed.
    #[error("failed to serialize configuration: {0}")]
    Serialize(String),

    /// A `set` walked into a path segment that already holds a non-mapping
    /// value (e.g. writing `mqtt.host.sub` when `mqtt.host` is a string).
    #[error("cannot write {path}: segment '{segment}' holds a non-mapping value")]
    PathConflict { path: String, segment: String },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
