//! Error types for encoding and decoding.

use thiserror::Error;

use yarspg_syntax::SyntaxError;

/// Errors raised by the codec.
///
/// Only [`CodecError::Syntax`] is always fatal. The edge-level variants are
/// returned when strict edge handling is enabled and otherwise cause the edge
/// to be dropped. [`CodecError::MalformedPropertyList`] is recovered by
/// treating the list as empty.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed property list [{fragment}]: {detail}")]
    MalformedPropertyList { fragment: String, detail: String },

    #[error("edge on line {line} references unresolved node '{id}'")]
    UnresolvedEndpoint { line: usize, id: String },

    #[error("edge on line {line} has non-IRI predicate label '{label}'")]
    NonIriPredicate { line: usize, label: String },

    #[error("edge on line {line} has no predicate @value")]
    MissingPredicateValue { line: usize },

    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
