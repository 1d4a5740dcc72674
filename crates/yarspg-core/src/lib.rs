//! Shared graph model for the YARS-PG codec.
//!
//! Both directions of the codec speak in terms of [`Term`] and [`Triple`]:
//! the encoder reads triples from a [`Graph`], the decoder pushes them into
//! any [`TripleSink`].

pub mod graph;
pub mod term;

pub use graph::{Graph, TermError, Triple, TripleSink};
pub use term::{Iri, Literal, Term, TermKind};

/// Well-known datatype IRIs.
pub mod vocab {
    pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
}
