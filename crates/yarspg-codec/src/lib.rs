//! YARS-PG codec.
//!
//! Encoding turns an ordered triple collection into a Nodes section and an
//! Edges section: every distinct term becomes one node record with a
//! document-local id, and every triple becomes one edge between two ids.
//! Decoding parses the text, rebuilds a node table and resolves each edge
//! back into a triple.
//!
//! ```
//! use yarspg_codec::{parse, serialize};
//! use yarspg_core::{Graph, Iri, Literal, Term, Triple};
//!
//! let graph: Graph = [Triple::new(
//!     Term::iri("http://ex/s"),
//!     Iri::new("http://ex/p"),
//!     Term::literal(Literal::simple("hello")),
//! )]
//! .into_iter()
//! .collect();
//!
//! let sections = serialize(&graph);
//! let decoded = parse(&sections.document()).unwrap();
//! assert!(decoded.same_triples(&graph));
//! ```

pub mod error;
pub mod options;
pub mod registry;
pub mod sections;
pub mod table;
pub mod value;
pub mod walker;
pub mod writer;

pub use error::{CodecError, Result};
pub use options::{DecodeOptions, IriEncoding};
pub use registry::{EdgeRecord, NodeKind, NodeRecord, NodeRegistry, Role};
pub use sections::{combine, split, SplitDocument};
pub use table::{NodeEntry, NodeTable};
pub use walker::{build, DecodeStats, TreeWalker};
pub use writer::{serialize, SectionWriter, Sections, SerializeStats};

use yarspg_core::{Graph, TripleSink};

/// Decode a document with default options.
pub fn parse(document: &str) -> Result<Graph> {
    parse_with(document, &DecodeOptions::default())
}

/// Decode a document into a fresh [`Graph`].
pub fn parse_with(document: &str, options: &DecodeOptions) -> Result<Graph> {
    let mut graph = Graph::new();
    parse_into(document, &mut graph, options)?;
    Ok(graph)
}

/// Decode a document into any sink.
pub fn parse_into<S: TripleSink + ?Sized>(
    document: &str,
    sink: &mut S,
    options: &DecodeOptions,
) -> Result<DecodeStats> {
    let tree = yarspg_syntax::parse(document)?;
    build(&tree, sink, options)
}
