//! I/O error types.

use thiserror::Error;

/// Errors raised while reading or writing RDF text and compressed files.
#[derive(Debug, Error)]
pub enum IoError {
    /// Compression method name not recognized.
    #[error("unsupported compression method '{0}' (expected gzip, brotli, zstd or snappy)")]
    UnsupportedCompression(String),

    /// RDF format name not recognized.
    #[error("unsupported RDF format '{0}' (expected ntriples or turtle)")]
    UnsupportedRdfFormat(String),

    /// A compression filter failed.
    #[error("{method} error: {detail}")]
    Compression { method: String, detail: String },

    /// RDF syntax error from the reader.
    #[error("RDF syntax error: {0}")]
    Rdf(String),

    /// A term that cannot be written in the chosen RDF format.
    #[error("invalid term: {0}")]
    InvalidTerm(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for I/O operations.
pub type Result<T> = std::result::Result<T, IoError>;
