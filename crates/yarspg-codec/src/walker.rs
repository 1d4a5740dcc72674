//! Decoder: parse tree to triples.
//!
//! A single pre-order walk. Node declarations fill the [`NodeTable`] as they
//! are met and edges are resolved against whatever the table holds at that
//! point, so a node must be declared before any edge that uses it.

use tracing::{debug, info, warn};

use yarspg_core::{Iri, Literal, Term, Triple, TripleSink};
use yarspg_syntax::{EdgeProduction, NodeProduction, ParseTree, Production, Rule, TreeNode};

use crate::error::{CodecError, Result};
use crate::options::DecodeOptions;
use crate::registry::NodeKind;
use crate::table::{NodeEntry, NodeTable};
use crate::value::{self, VALUE_KEY};

/// Counts reported after a decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Node declarations seen, including redeclarations.
    pub nodes: usize,
    /// Edge declarations seen.
    pub edges: usize,
    /// Triples pushed to the sink.
    pub triples: usize,
    /// Edges that produced no triple.
    pub dropped: usize,
}

/// Walks one parse tree and pushes the resulting triples into a sink.
pub struct TreeWalker<'s, S: TripleSink + ?Sized> {
    sink: &'s mut S,
    options: DecodeOptions,
    table: NodeTable,
    stats: DecodeStats,
}

impl<'s, S: TripleSink + ?Sized> TreeWalker<'s, S> {
    pub fn new(sink: &'s mut S, options: DecodeOptions) -> Self {
        Self {
            sink,
            options,
            table: NodeTable::new(),
            stats: DecodeStats::default(),
        }
    }

    /// Visit every production in document order.
    pub fn walk(&mut self, tree: &ParseTree<'_>) -> Result<()> {
        for node in tree.root.descendants() {
            self.visit(node)?;
        }
        Ok(())
    }

    pub fn table(&self) -> &NodeTable {
        &self.table
    }

    pub fn stats(&self) -> DecodeStats {
        self.stats
    }

    fn visit(&mut self, node: &TreeNode<'_>) -> Result<()> {
        match &node.production {
            Production::Node(decl) => self.declare(decl),
            Production::Edge(edge) => self.connect(edge)?,
            Production::Terminal(_) => {}
            Production::Other(Rule::Document) => {}
        }
        Ok(())
    }

    fn declare(&mut self, decl: &NodeProduction<'_>) {
        let properties = value::decode_or_empty(value::strip_brackets(decl.prop_text()));
        let entry = NodeEntry::new(decl.kind_label(), properties);
        debug!(id = decl.id(), kind = ?entry.kind(), line = decl.line(), "node");
        if self.table.insert(decl.id(), entry).is_some() {
            debug!(id = decl.id(), "node redeclared, keeping the later one");
        }
        self.stats.nodes += 1;
    }

    fn connect(&mut self, edge: &EdgeProduction<'_>) -> Result<()> {
        self.stats.edges += 1;
        match self.edge_triple(edge) {
            Ok(triple) => {
                debug!(%triple, "triple");
                self.sink.insert(triple);
                self.stats.triples += 1;
                Ok(())
            }
            Err(err) if self.options.strict_edges => Err(err),
            Err(err) => {
                warn!(%err, "dropping edge");
                self.stats.dropped += 1;
                Ok(())
            }
        }
    }

    fn edge_triple(&self, edge: &EdgeProduction<'_>) -> Result<Triple> {
        let body = edge.body();
        let line = body.line();

        let label = body.predicate_label().unwrap_or("");
        if NodeKind::from_label(label) != Some(NodeKind::Iri) {
            return Err(CodecError::NonIriPredicate {
                line,
                label: label.to_string(),
            });
        }

        let properties = value::decode_or_empty(value::strip_brackets(body.prop_text()));
        let predicate = properties
            .get(VALUE_KEY)
            .ok_or(CodecError::MissingPredicateValue { line })?;
        let predicate = Iri::new(self.options.iri_encoding.apply(predicate));

        let subject = self.endpoint(body.source_id(), line)?;
        let object = self.endpoint(body.target_id(), line)?;
        Ok(Triple::new(subject, predicate, object))
    }

    fn endpoint(&self, id: &str, line: usize) -> Result<Term> {
        self.resolve_term(id)
            .ok_or_else(|| CodecError::UnresolvedEndpoint {
                line,
                id: id.to_string(),
            })
    }

    /// Build the term declared under `id`, if it has a usable value.
    pub fn resolve_term(&self, id: &str) -> Option<Term> {
        let entry = self.table.get(id)?;
        let kind = entry.kind().and_then(NodeKind::from_label);

        if kind == Some(NodeKind::Literal) {
            return entry.value().map(|v| {
                Term::literal(Literal {
                    value: v.to_string(),
                    datatype: entry.datatype().map(str::to_string),
                    language: entry.language().map(str::to_string),
                })
            });
        }

        let raw = entry.value().filter(|v| !v.is_empty())?;
        if kind == Some(NodeKind::BNode) && self.options.preserve_blank_nodes {
            Some(Term::blank(raw))
        } else {
            Some(Term::iri(self.options.iri_encoding.apply(raw)))
        }
    }
}

/// Walk `tree`, pushing every resolvable edge into `sink`.
pub fn build<S: TripleSink + ?Sized>(
    tree: &ParseTree<'_>,
    sink: &mut S,
    options: &DecodeOptions,
) -> Result<DecodeStats> {
    let mut walker = TreeWalker::new(sink, options.clone());
    walker.walk(tree)?;
    let stats = walker.stats();
    info!(
        nodes = stats.nodes,
        edges = stats.edges,
        triples = stats.triples,
        dropped = stats.dropped,
        "decoded document"
    );
    Ok(stats)
}
