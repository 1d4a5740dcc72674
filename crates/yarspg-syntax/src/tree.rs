//! YARS-PG parse tree.
//!
//! Every tree node carries a [`Production`] from a closed set, so consumers
//! dispatch with an exhaustive `match` instead of probing node types at run
//! time. Node and edge declarations expose typed accessors for their id,
//! labels, and raw property-list text.

use crate::lex::Token;

/// Structural rules that have no payload of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// The whole document; children are statements.
    Document,
}

/// What a tree node represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Production<'a> {
    Node(NodeProduction<'a>),
    Edge(EdgeProduction<'a>),
    Terminal(Token<'a>),
    Other(Rule),
}

/// One node of the parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode<'a> {
    pub production: Production<'a>,
    pub children: Vec<TreeNode<'a>>,
}

impl<'a> TreeNode<'a> {
    pub fn new(production: Production<'a>, children: Vec<TreeNode<'a>>) -> Self {
        Self {
            production,
            children,
        }
    }

    pub fn terminal(token: Token<'a>) -> Self {
        Self::new(Production::Terminal(token), Vec::new())
    }

    /// Depth-first, pre-order iteration over this node and its descendants.
    pub fn descendants(&self) -> Descendants<'_, 'a> {
        Descendants { stack: vec![self] }
    }
}

/// Pre-order iterator returned by [`TreeNode::descendants`].
pub struct Descendants<'t, 'a> {
    stack: Vec<&'t TreeNode<'a>>,
}

impl<'t, 'a> Iterator for Descendants<'t, 'a> {
    type Item = &'t TreeNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// A parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree<'a> {
    pub root: TreeNode<'a>,
}

impl<'a> ParseTree<'a> {
    pub fn node_count(&self) -> usize {
        self.statements()
            .filter(|n| matches!(n.production, Production::Node(_)))
            .count()
    }

    pub fn edge_count(&self) -> usize {
        self.statements()
            .filter(|n| matches!(n.production, Production::Edge(_)))
            .count()
    }

    fn statements(&self) -> impl Iterator<Item = &TreeNode<'a>> {
        self.root.children.iter()
    }
}

/// Strip surrounding double quotes from a label token.
pub fn strip_quotes(label: &str) -> &str {
    label.trim_matches('"')
}

/// `(id {labels} [props])`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeProduction<'a> {
    pub(crate) id: Token<'a>,
    pub(crate) labels: Vec<Token<'a>>,
    pub(crate) props: Option<&'a str>,
    pub(crate) line: usize,
}

impl<'a> NodeProduction<'a> {
    pub fn id(&self) -> &'a str {
        self.id.text
    }

    /// Raw label tokens, quotes included.
    pub fn labels(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.labels.iter().map(|t| t.text)
    }

    /// The first label with quotes stripped. This is the node's kind.
    pub fn kind_label(&self) -> Option<&'a str> {
        self.labels.first().map(|t| strip_quotes(t.text))
    }

    /// The property list including its brackets, or `""` when absent.
    pub fn prop_text(&self) -> &'a str {
        self.props.unwrap_or("")
    }

    /// 1-based source line of the opening parenthesis.
    pub fn line(&self) -> usize {
        self.line
    }
}

/// Endpoints and payload shared by both edge shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeBody<'a> {
    pub(crate) source: Token<'a>,
    pub(crate) target: Token<'a>,
    pub(crate) edge_id: Option<Token<'a>>,
    pub(crate) labels: Vec<Token<'a>>,
    pub(crate) props: Option<&'a str>,
    pub(crate) line: usize,
}

impl<'a> EdgeBody<'a> {
    pub fn source_id(&self) -> &'a str {
        self.source.text
    }

    pub fn target_id(&self) -> &'a str {
        self.target.text
    }

    /// Optional identifier of the edge itself, `(a)-(e1 {...})->(b)`.
    pub fn edge_id(&self) -> Option<&'a str> {
        self.edge_id.map(|t| t.text)
    }

    pub fn labels(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.labels.iter().map(|t| t.text)
    }

    /// The first label with quotes stripped.
    pub fn predicate_label(&self) -> Option<&'a str> {
        self.labels.first().map(|t| strip_quotes(t.text))
    }

    pub fn prop_text(&self) -> &'a str {
        self.props.unwrap_or("")
    }

    pub fn line(&self) -> usize {
        self.line
    }
}

/// An edge declaration; `->` is directed, `-` undirected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeProduction<'a> {
    Directed(EdgeBody<'a>),
    Undirected(EdgeBody<'a>),
}

impl<'a> EdgeProduction<'a> {
    pub fn body(&self) -> &EdgeBody<'a> {
        match self {
            EdgeProduction::Directed(body) | EdgeProduction::Undirected(body) => body,
        }
    }

    pub fn is_directed(&self) -> bool {
        matches!(self, EdgeProduction::Directed(_))
    }
}
