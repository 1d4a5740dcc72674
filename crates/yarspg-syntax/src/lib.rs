//! YARS-PG grammar: lexer, parser, and typed parse tree.
//!
//! The parser accepts the node/edge statements of a YARS-PG document and
//! returns a [`ParseTree`] whose nodes are tagged with a closed
//! [`Production`] enum. Property lists are kept as raw text; interpreting
//! them is the decoder's job.
//!
//! # Example
//!
//! ```
//! use yarspg_syntax::{parse, Production};
//!
//! let tree = parse(r#"(s1 {"IRI"} ["@value": "http://ex/s"])"#).unwrap();
//! let Production::Node(node) = &tree.root.children[0].production else {
//!     unreachable!()
//! };
//! assert_eq!(node.id(), "s1");
//! assert_eq!(node.kind_label(), Some("IRI"));
//! ```

pub mod error;
pub mod lex;
pub mod parser;
pub mod tree;

pub use error::{Result, SyntaxError};
pub use lex::{tokenize, Token, TokenKind};
pub use parser::parse;
pub use tree::{
    strip_quotes, EdgeBody, EdgeProduction, NodeProduction, ParseTree, Production, Rule, TreeNode,
};
