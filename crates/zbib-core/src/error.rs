//! Error types for the bibliography client

use crate::storage::StorageError;
use thiserror::Error;

/// Errors surfaced by the bibliography client.
///
/// An ambiguous translation result (HTTP 300) is not an error; it is the
/// `Choices` variant of [`crate::client::TranslationResult`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("translation failed with status {status}")]
    Translation { status: u16, body: String },

    #[error("export failed with status {status}")]
    Export { status: u16, body: String },

    #[error("http transport error: {0}")]
    Http(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("item index {0} out of range")]
    IndexOutOfRange(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
