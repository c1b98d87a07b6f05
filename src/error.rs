//! Error types for soft-delete augmentation

use strum::Display;
use thiserror::Error;

/// Callback that a `custom` soft-delete field must be given explicitly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "camelCase")]
pub enum Callback {
    ValueOnDelete,
    ValueOnFilter,
}

/// Errors that can occur while building a context or augmenting a query
#[derive(Debug, Error)]
pub enum ParanoidError {
    #[error("Schema metadata not found: {0}")]
    MissingMetadata(String),

    #[error("Duplicate model in schema metadata: {0}")]
    DuplicateModel(String),

    #[error("Invalid soft-delete field: {0}")]
    InvalidField(String),

    #[error(
        "Model '{model}' uses a custom soft-delete field but no {callback} callback was configured"
    )]
    MissingCallback { model: String, callback: Callback },

    #[error("Invalid query arguments: {0}")]
    InvalidArguments(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ParanoidError {
    pub fn missing_metadata(msg: impl Into<String>) -> Self {
        Self::MissingMetadata(msg.into())
    }

    pub fn invalid_field(msg: impl Into<String>) -> Self {
        Self::InvalidField(msg.into())
    }

    pub fn missing_callback(model: impl Into<String>, callback: Callback) -> Self {
        Self::MissingCallback {
            model: model.into(),
            callback,
        }
    }

    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, ParanoidError>;
