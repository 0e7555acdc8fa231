use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown view mode: {0}")]
    UnknownViewMode(String),
    #[error("unknown category group: {0}")]
    UnknownGroupType(String),
    #[error("stored mode value is not a serialization id: {found}")]
    InvalidStoredMode { found: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
