//! Error types for the untoc library.

use std::io;
use thiserror::Error;

/// Result type alias for untoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur at the input boundary.
///
/// Outline inference itself never fails: malformed pages are skipped and a
/// document with no usable spans still produces a valid (empty) outline.
/// Errors are limited to reading and decoding span dumps.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error decoding a span-dump document.
    #[error("Span dump decoding error: {0}")]
    SpanDecode(#[from] serde_json::Error),

    /// The span dump was structurally valid JSON but not a usable document.
    #[error("Invalid span document: {0}")]
    InvalidDocument(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
