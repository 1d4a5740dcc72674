//! Recursive-descent parser for YARS-PG node and edge statements.
//!
//! ```text
//! document  := statement*
//! statement := node | edge
//! node      := '(' ID labels? props? ')'
//! edge      := '(' ID ')' '-' '(' ID? labels? props? ')' ('->' | '-') '(' ID ')'
//! labels    := '{' (STRING (',' STRING)*)? '}'
//! props     := '[' balanced ']'
//! ```
//!
//! Property lists are not interpreted here. The parser only balances their
//! brackets and braces and hands the raw source slice to the caller.

use crate::error::{Result, SyntaxError};
use crate::lex::{tokenize, LineIndex, Token, TokenKind};
use crate::tree::{
    EdgeBody, EdgeProduction, NodeProduction, ParseTree, Production, Rule, TreeNode,
};

/// Parse a whole document into a tree.
pub fn parse(input: &str) -> Result<ParseTree<'_>> {
    let tokens = tokenize(input)?;
    Parser::new(input, tokens).document()
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Token<'a>>,
    pos: usize,
    lines: LineIndex,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, tokens: Vec<Token<'a>>) -> Self {
        Self {
            input,
            tokens,
            pos: 0,
            lines: LineIndex::new(input),
        }
    }

    fn document(mut self) -> Result<ParseTree<'a>> {
        let mut statements = Vec::new();
        while !self.peek().is_eof() {
            statements.push(self.statement()?);
        }
        Ok(ParseTree {
            root: TreeNode::new(Production::Other(Rule::Document), statements),
        })
    }

    fn statement(&mut self) -> Result<TreeNode<'a>> {
        let first = self.pos;
        let open = self.expect(TokenKind::LParen)?;
        let line = self.line_of(&open);
        let id = self.expect(TokenKind::Word)?;

        let is_edge = self.peek().kind == TokenKind::RParen
            && self.peek_at(1).kind == TokenKind::Dash
            && self.peek_at(2).kind == TokenKind::LParen;

        let production = if is_edge {
            self.edge_rest(id, line)?
        } else {
            self.node_rest(id, line)?
        };

        let children = self.tokens[first..self.pos]
            .iter()
            .copied()
            .map(TreeNode::terminal)
            .collect();
        Ok(TreeNode::new(production, children))
    }

    fn node_rest(&mut self, id: Token<'a>, line: usize) -> Result<Production<'a>> {
        let labels = self.labels()?;
        let props = self.props()?;
        self.expect(TokenKind::RParen)?;
        Ok(Production::Node(NodeProduction {
            id,
            labels,
            props,
            line,
        }))
    }

    fn edge_rest(&mut self, source: Token<'a>, line: usize) -> Result<Production<'a>> {
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Dash)?;
        self.expect(TokenKind::LParen)?;

        let edge_id = if self.peek().kind == TokenKind::Word {
            Some(self.advance())
        } else {
            None
        };
        let labels = self.labels()?;
        let props = self.props()?;
        self.expect(TokenKind::RParen)?;

        let directed = match self.peek().kind {
            TokenKind::Arrow => true,
            TokenKind::Dash => false,
            _ => return Err(self.unexpected("'->' or '-'")),
        };
        self.advance();

        self.expect(TokenKind::LParen)?;
        let target = self.expect(TokenKind::Word)?;
        self.expect(TokenKind::RParen)?;

        let body = EdgeBody {
            source,
            target,
            edge_id,
            labels,
            props,
            line,
        };
        Ok(Production::Edge(if directed {
            EdgeProduction::Directed(body)
        } else {
            EdgeProduction::Undirected(body)
        }))
    }

    fn labels(&mut self) -> Result<Vec<Token<'a>>> {
        let mut labels = Vec::new();
        if self.peek().kind != TokenKind::LBrace {
            return Ok(labels);
        }
        self.advance();
        if self.peek().kind == TokenKind::RBrace {
            self.advance();
            return Ok(labels);
        }
        loop {
            labels.push(self.expect(TokenKind::String)?);
            match self.peek().kind {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::RBrace => {
                    self.advance();
                    return Ok(labels);
                }
                _ => return Err(self.unexpected("',' or '}'")),
            }
        }
    }

    /// Consume a balanced `[...]` and return its source text.
    fn props(&mut self) -> Result<Option<&'a str>> {
        if self.peek().kind != TokenKind::LBracket {
            return Ok(None);
        }
        let open = self.advance();
        let mut closers = vec![TokenKind::RBracket];

        while let Some(&expected) = closers.last() {
            let token = self.peek();
            match token.kind {
                TokenKind::LBracket => closers.push(TokenKind::RBracket),
                TokenKind::LBrace => closers.push(TokenKind::RBrace),
                TokenKind::RBracket | TokenKind::RBrace if token.kind == expected => {
                    closers.pop();
                }
                TokenKind::RBracket | TokenKind::RBrace | TokenKind::Eof => {
                    return Err(self.unexpected(&expected.to_string()));
                }
                _ => {}
            }
            let last = self.advance();
            if closers.is_empty() {
                return Ok(Some(&self.input[open.start..last.end]));
            }
        }
        Ok(None)
    }

    fn peek(&self) -> Token<'a> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Token<'a> {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        self.tokens[idx]
    }

    fn advance(&mut self) -> Token<'a> {
        let token = self.peek();
        if !token.is_eof() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token<'a>> {
        if self.peek().kind == kind {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    fn line_of(&self, token: &Token<'a>) -> usize {
        self.lines.line_col(self.input, token.start).0
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        let token = self.peek();
        let found = if token.is_eof() {
            token.kind.to_string()
        } else {
            format!("'{}'", token.text)
        };
        let (line, column, message) = self.lines.render(
            self.input,
            token.start,
            &format!("expected {expected}, found {found}"),
        );
        SyntaxError::Parse {
            line,
            column,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"# Nodes
(s1 {"IRI"} ["@value": "http://ex/s"])
(o1 {"Literal"} ["@value": "hello", "@lang": "en"])
# Edges
(s1)-({"IRI"} ["@value": "http://ex/p"])->(o1)
"#;

    fn statements<'t, 'a>(tree: &'t ParseTree<'a>) -> &'t [TreeNode<'a>] {
        &tree.root.children
    }

    #[test]
    fn parses_nodes_and_edges() {
        let tree = parse(DOC).unwrap();
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.edge_count(), 1);
        assert_eq!(tree.root.production, Production::Other(Rule::Document));
    }

    #[test]
    fn node_accessors() {
        let tree = parse(DOC).unwrap();
        let Production::Node(node) = &statements(&tree)[1].production else {
            panic!("expected node production");
        };
        assert_eq!(node.id(), "o1");
        assert_eq!(node.kind_label(), Some("Literal"));
        assert_eq!(node.prop_text(), r#"["@value": "hello", "@lang": "en"]"#);
        assert_eq!(node.line(), 3);
    }

    #[test]
    fn edge_accessors() {
        let tree = parse(DOC).unwrap();
        let Production::Edge(edge) = &statements(&tree)[2].production else {
            panic!("expected edge production");
        };
        assert!(edge.is_directed());
        let body = edge.body();
        assert_eq!(body.source_id(), "s1");
        assert_eq!(body.target_id(), "o1");
        assert_eq!(body.edge_id(), None);
        assert_eq!(body.predicate_label(), Some("IRI"));
        assert_eq!(body.prop_text(), r#"["@value": "http://ex/p"]"#);
        assert_eq!(body.line(), 5);
    }

    #[test]
    fn undirected_edge_with_id_and_labels() {
        let tree = parse(r#"(a)-(e1 {"knows", "IRI"} ["since": 2001])-(b)"#).unwrap();
        let Production::Edge(EdgeProduction::Undirected(body)) = &statements(&tree)[0].production
        else {
            panic!("expected undirected edge");
        };
        assert_eq!(body.edge_id(), Some("e1"));
        assert_eq!(body.predicate_label(), Some("knows"));
        assert_eq!(body.labels().count(), 2);
    }

    #[test]
    fn bare_node_and_empty_labels() {
        let tree = parse("(x)\n(y {})").unwrap();
        assert_eq!(tree.node_count(), 2);
        let Production::Node(node) = &statements(&tree)[1].production else {
            panic!("expected node production");
        };
        assert_eq!(node.kind_label(), None);
        assert_eq!(node.prop_text(), "");
    }

    #[test]
    fn nested_property_values_are_balanced() {
        let tree = parse(r#"(n {"Doc"} ["list": [1, [2]], "obj": {"k": "]"}])"#).unwrap();
        let Production::Node(node) = &statements(&tree)[0].production else {
            panic!("expected node production");
        };
        assert_eq!(
            node.prop_text(),
            r#"["list": [1, [2]], "obj": {"k": "]"}]"#
        );
    }

    #[test]
    fn statement_children_are_terminals() {
        let tree = parse("(a)-({\"IRI\"})->(b)").unwrap();
        let edge = &statements(&tree)[0];
        assert_eq!(edge.children.len(), 12);
        assert!(edge
            .children
            .iter()
            .all(|c| matches!(c.production, Production::Terminal(_))));
    }

    #[test]
    fn preorder_descendants() {
        let tree = parse("(a)\n(b)").unwrap();
        let first_terminal = tree
            .root
            .descendants()
            .find_map(|n| match n.production {
                Production::Terminal(t) if t.kind == TokenKind::Word => Some(t.text),
                _ => None,
            });
        assert_eq!(first_terminal, Some("a"));
        // root + 2 statements + 3 terminals each
        assert_eq!(tree.root.descendants().count(), 9);
    }

    #[test]
    fn empty_document() {
        let tree = parse("# Nodes\n# Edges\n").unwrap();
        assert!(tree.root.children.is_empty());
    }

    #[test]
    fn missing_arrow_target_is_an_error() {
        let err = parse("(a)-({\"IRI\"})->").unwrap_err();
        assert!(matches!(err, SyntaxError::Parse { line: 1, .. }));
        assert!(err.to_string().contains("expected '('"));
    }

    #[test]
    fn unbalanced_props_is_an_error() {
        let err = parse("(a {\"IRI\"} [\"@value\": \"x\")").unwrap_err();
        assert!(err.to_string().contains("expected ']'"));
    }

    #[test]
    fn bad_label_list_is_an_error() {
        let err = parse("(a {\"IRI\" \"BNode\"})").unwrap_err();
        assert!(err.to_string().contains("expected ',' or '}'"));
    }
}
