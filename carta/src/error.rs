//! Error types used by the crate.

use carta_types::CartaTypesError;
use thiserror::Error;

/// Carta error type.
#[derive(Debug, Error)]
pub enum CartaError {
    /// I/O error (network or file)
    #[error("failed to load data")]
    Io,
    /// Item not found.
    #[error("item not found")]
    NotFound,
    /// The query cannot be answered by the store.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    /// Invalid geometry or CRS input.
    #[error(transparent)]
    Types(#[from] CartaTypesError),
    /// Error reading/writing data to the FS.
    #[error("failed to read file")]
    FsIo(#[from] std::io::Error),
    /// Generic error - details are inside.
    #[error("{0}")]
    Generic(String),
}

impl From<reqwest::Error> for CartaError {
    fn from(_value: reqwest::Error) -> Self {
        Self::Io
    }
}
