//! Error types for YARS-PG tokenizing and parsing.

/// A fatal syntax error. The message already contains a source pointer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    /// The input contains text that is not a valid token.
    #[error("lexer error at line {line}, column {column}: {message}")]
    Lexer {
        line: usize,
        column: usize,
        message: String,
    },

    /// The token stream does not match the grammar.
    #[error("parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },
}

impl SyntaxError {
    /// 1-based line of the error.
    pub fn line(&self) -> usize {
        match self {
            SyntaxError::Lexer { line, .. } | SyntaxError::Parse { line, .. } => *line,
        }
    }
}

/// Result type for syntax operations.
pub type Result<T> = std::result::Result<T, SyntaxError>;
