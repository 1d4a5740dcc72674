//! YARS-PG lexer module.

pub mod lexer;
pub mod token;

pub use lexer::{tokenize, LineIndex};
pub use token::{Token, TokenKind};
