//! Error types for the geokat-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the geokat library.
#[derive(Error, Debug)]
pub enum GeokatError {
    /// Coordinate catalog output error.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to writing the coordinate catalog and issues report.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Failed to create the output directory.
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write the catalog or issues file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for the geokat library.
pub type Result<T> = std::result::Result<T, GeokatError>;
