//! Section writer: triples to YARS-PG text.

use tracing::{debug, info};

use yarspg_core::{Term, Triple};

use crate::registry::{EdgeRecord, NodeKind, NodeRegistry, NodeRecord, Role};
use crate::value;

pub const NODES_HEADER: &str = "# Nodes";
pub const EDGES_HEADER: &str = "# Edges";

/// Serialized document, one string per section.
///
/// Each section starts with its header line and every line ends with `\n`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    pub nodes: String,
    pub edges: String,
}

impl Sections {
    /// Both sections as one document, nodes first.
    pub fn document(&self) -> String {
        let mut doc = String::with_capacity(self.nodes.len() + self.edges.len());
        doc.push_str(&self.nodes);
        doc.push_str(&self.edges);
        doc
    }
}

/// Counts reported after an encode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializeStats {
    pub nodes: usize,
    pub edges: usize,
}

/// Accumulates node and edge records for one document.
#[derive(Debug, Default)]
pub struct SectionWriter {
    registry: NodeRegistry,
    edges: Vec<EdgeRecord>,
}

impl SectionWriter {
    pub fn new() -> Self {
        Self {
            registry: NodeRegistry::new(),
            edges: Vec::new(),
        }
    }

    /// Register both endpoints and record the edge.
    pub fn push(&mut self, triple: &Triple) {
        let source = self
            .registry
            .register(&triple.subject, Role::Subject)
            .to_string();
        let target = self
            .registry
            .register(&triple.object, Role::Object)
            .to_string();
        debug!(%source, predicate = %triple.predicate, %target, "edge");
        self.edges.push(EdgeRecord {
            source,
            predicate: triple.predicate.clone(),
            target,
        });
    }

    pub fn stats(&self) -> SerializeStats {
        SerializeStats {
            nodes: self.registry.len(),
            edges: self.edges.len(),
        }
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// Render both sections.
    pub fn finish(self) -> Sections {
        let stats = self.stats();

        let mut nodes = String::new();
        nodes.push_str(NODES_HEADER);
        nodes.push('\n');
        for record in self.registry.records() {
            write_node(&mut nodes, record);
        }

        let mut edges = String::new();
        edges.push_str(EDGES_HEADER);
        edges.push('\n');
        for edge in &self.edges {
            write_edge(&mut edges, edge);
        }

        info!(nodes = stats.nodes, edges = stats.edges, "serialized graph");
        Sections { nodes, edges }
    }
}

fn write_node(out: &mut String, record: &NodeRecord) {
    out.push_str(&format!(
        "({} {{\"{}\"}} [{}])\n",
        record.id,
        record.kind,
        record.fragment()
    ));
}

fn write_edge(out: &mut String, edge: &EdgeRecord) {
    let predicate = value::encode(&Term::Iri(edge.predicate.clone()));
    out.push_str(&format!(
        "({})-({{\"{}\"}} [{}])->({})\n",
        edge.source,
        NodeKind::Iri,
        predicate,
        edge.target
    ));
}

/// Serialize triples in iteration order.
pub fn serialize<'a, I>(triples: I) -> Sections
where
    I: IntoIterator<Item = &'a Triple>,
{
    let mut writer = SectionWriter::new();
    for triple in triples {
        writer.push(triple);
    }
    writer.finish()
}
