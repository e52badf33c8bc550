//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error)]
pub enum CartaTypesError {
    /// Geometry did not pass construction validation.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// No projection is known for the requested CRS.
    #[error("projection is not supported: {0}")]
    UnsupportedProjection(String),
}
