//! YARS-PG token types.

use std::fmt;

/// A token borrowing its text from the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Exact source text, including quotes for strings.
    pub text: &'a str,
    /// Start byte offset.
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, start: usize) -> Self {
        Self {
            kind,
            text,
            start,
            end: start + text.len(),
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

/// Token kinds for YARS-PG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `-` when not the sign of a number
    Dash,
    /// `->`
    Arrow,
    /// Double-quoted string with backslash escapes
    String,
    /// Identifier, number, or bare keyword such as `true`
    Word,
    /// End of input
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Dash => write!(f, "'-'"),
            TokenKind::Arrow => write!(f, "'->'"),
            TokenKind::String => write!(f, "string"),
            TokenKind::Word => write!(f, "identifier"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}
