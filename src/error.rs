//! Error types for the releve library.

use std::io;
use thiserror::Error;

/// Result type alias for releve operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting statement tables.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading the layout dump.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source document could not be opened or decoded. Fatal: aborts
    /// the whole parse.
    #[error("Cannot open document: {0}")]
    DocumentOpen(String),

    /// A span was missing required text or geometry fields. Recoverable:
    /// the span is skipped and the rest of the page is processed.
    #[error("Malformed span: {0}")]
    MalformedSpan(String),

    /// Page index is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(usize, usize),

    /// Error serializing results.
    #[error("Serialization error: {0}")]
    Serialize(String),
}
