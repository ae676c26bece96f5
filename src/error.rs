//! Error types for shapelib.
//!
//! Shape-check rejections are not errors: they are recorded on the
//! [`Evaluation`](crate::evaluation::Evaluation) as a failure. The variants
//! below cover the fallible edges of the crate (parsing names, loading
//! constants, reading system snapshots).

use thiserror::Error;

/// Result type for shapelib operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A shape name that is not part of the catalog
    #[error("Unknown shape: {0}")]
    UnknownShape(String),

    /// A check constant outside its valid range
    #[error("Invalid constant {name}: {message}")]
    InvalidConstant { name: &'static str, message: String },

    /// A system snapshot the checks cannot use
    #[error("Invalid system: {0}")]
    InvalidSystem(String),

    /// The process-wide shape checker was already built
    #[error("Shape checker already initialized")]
    AlreadyInitialized,

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
