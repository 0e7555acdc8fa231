#![deny(unsafe_code)]

use std::path::PathBuf;
use std::time::Duration;

use navcat_model::{ViewMode, VirtualKey};

#[derive(Debug, thiserror::Error)]
pub enum NavCategoryError {
    #[error("duplicate serialization id {id} ({first} and {second})")]
    DuplicateSerializationId {
        id: i32,
        first: ViewMode,
        second: ViewMode,
    },

    #[error("duplicate friendly name '{name}'")]
    DuplicateFriendlyName { name: String },

    #[error("duplicate view mode {mode}")]
    DuplicateViewMode { mode: ViewMode },

    #[error("accelerator key {key} bound to both {first} and {second}")]
    DuplicateAcceleratorKey {
        key: VirtualKey,
        first: ViewMode,
        second: ViewMode,
    },

    #[error("manifest entry uses the None sentinel: {message}")]
    SentinelEntry { message: String },

    #[error("missing resource string '{key}'")]
    MissingResource { key: String },

    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {message}")]
    InvalidConfig { message: String },

    #[error("global registry already installed")]
    GlobalAlreadyInstalled,
}

impl NavCategoryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure of the policy round-trip behind the feature gate.
///
/// These never reach registry callers; the gate logs them and falls back
/// to "disabled".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("no local user account could be resolved")]
    NoLocalUser,

    #[error("policy provider unavailable: {message}")]
    Unavailable { message: String },

    #[error("policy check timed out after {0:?}")]
    Timeout(Duration),
}
