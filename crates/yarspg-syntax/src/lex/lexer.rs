//! YARS-PG lexer.
//!
//! Turns a document into a flat token stream with byte spans. Whitespace and
//! line comments (`#…` and `%…`) are trivia, which is how section headers
//! such as `# Nodes` or `% EDGES` disappear before parsing. Fails fast on the
//! first invalid character with a line/column pointer.

use winnow::combinator::{alt, delimited, peek};
use winnow::error::ContextError;
use winnow::stream::Location;
use winnow::token::{any, one_of, take_till, take_while};
use winnow::{LocatingSlice, ModalResult, Parser};

use super::token::{Token, TokenKind};
use crate::error::{Result, SyntaxError};

/// Byte offsets of line starts, for turning spans into line/column pairs.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(input: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(input.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    /// 1-based (line, column) for a byte offset. Columns count characters.
    pub fn line_col(&self, input: &str, pos: usize) -> (usize, usize) {
        let line = match self.starts.binary_search(&pos) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let line_start = self.starts[line];
        let column = input
            .get(line_start..pos)
            .map(|s| s.chars().count())
            .unwrap_or(0)
            + 1;
        (line + 1, column)
    }

    /// Text of a 1-based line, without its terminator.
    pub fn line_text<'a>(&self, input: &'a str, line: usize) -> &'a str {
        let Some(&start) = self.starts.get(line.saturating_sub(1)) else {
            return "";
        };
        let end = self.starts.get(line).map(|e| e - 1).unwrap_or(input.len());
        input
            .get(start..end.max(start))
            .unwrap_or("")
            .trim_end_matches('\r')
    }

    /// Render a message with the offending line and a caret under `pos`.
    pub fn render(&self, input: &str, pos: usize, message: &str) -> (usize, usize, String) {
        let (line, column) = self.line_col(input, pos);
        let text = self.line_text(input, line);
        let pointer = " ".repeat(column.saturating_sub(1));
        let rendered = format!("{message}\n  |\n{line} | {text}\n  | {pointer}^");
        (line, column, rendered)
    }
}

/// Lexer input; spans come from the stream's location.
pub type Input<'a> = LocatingSlice<&'a str>;

/// Tokenize an entire document. The last token is always [`TokenKind::Eof`].
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut input = LocatingSlice::new(source);

    loop {
        skip_trivia(&mut input);

        let start = input.current_token_start();
        if input.is_empty() {
            tokens.push(Token::new(TokenKind::Eof, "", start));
            break;
        }

        match next_token(&mut input) {
            Ok(kind) => {
                let end = input.current_token_start();
                tokens.push(Token::new(kind, &source[start..end], start));
            }
            Err(_) => return Err(lex_error(source, start)),
        }
    }

    Ok(tokens)
}

fn lex_error(source: &str, pos: usize) -> SyntaxError {
    let message = match source[pos..].chars().next() {
        Some('"') => "unterminated string literal".to_string(),
        Some(c) => format!("unexpected character '{c}'"),
        None => "unexpected end of input".to_string(),
    };
    let (line, column, message) = LineIndex::new(source).render(source, pos, &message);
    SyntaxError::Lexer {
        line,
        column,
        message,
    }
}

/// Whitespace plus `#…` and `%…` line comments.
fn skip_trivia(input: &mut Input<'_>) {
    loop {
        let _: ModalResult<&str, ContextError> =
            take_while(0.., char::is_whitespace).parse_next(input);

        if input.starts_with(['#', '%']) {
            let _: ModalResult<&str, ContextError> =
                take_till(0.., |c| c == '\n').parse_next(input);
        } else {
            break;
        }
    }
}

fn next_token(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((arrow, string, signed_number, word, punctuation)).parse_next(input)
}

fn arrow(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    "->".value(TokenKind::Arrow).parse_next(input)
}

/// Double-quoted string. Escapes are kept as written; a raw newline or a
/// backslash before one ends the token unterminated.
fn string(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    delimited('"', string_body, '"')
        .value(TokenKind::String)
        .parse_next(input)
}

fn string_body(input: &mut Input<'_>) -> ModalResult<()> {
    loop {
        let _: &str = take_till(0.., ['"', '\\', '\n']).parse_next(input)?;

        if input.starts_with('\\') {
            ('\\', any.verify(|c: &char| *c != '\n'))
                .void()
                .parse_next(input)?;
        } else {
            return Ok(());
        }
    }
}

/// `-12`, `+4`: a sign only belongs to a number when a digit follows.
fn signed_number(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    (one_of(['-', '+']), peek(one_of(|c: char| c.is_ascii_digit())), word_tail)
        .value(TokenKind::Word)
        .parse_next(input)
}

fn word(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    (peek(one_of(is_word_char)), word_tail)
        .value(TokenKind::Word)
        .parse_next(input)
}

/// Word characters, plus an exponent sign right after `e`/`E`.
fn word_tail(input: &mut Input<'_>) -> ModalResult<()> {
    loop {
        let chunk: &str = take_while(0.., is_word_char).parse_next(input)?;

        if chunk.ends_with(['e', 'E']) && input.starts_with(['-', '+']) {
            any.void().parse_next(input)?;
        } else {
            return Ok(());
        }
    }
}

fn punctuation(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    any.verify_map(|c| match c {
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        '{' => Some(TokenKind::LBrace),
        '}' => Some(TokenKind::RBrace),
        '[' => Some(TokenKind::LBracket),
        ']' => Some(TokenKind::RBracket),
        ',' => Some(TokenKind::Comma),
        ':' => Some(TokenKind::Colon),
        '-' => Some(TokenKind::Dash),
        _ => None,
    })
    .parse_next(input)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}
