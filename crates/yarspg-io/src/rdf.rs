//! RDF text formats.
//!
//! Reading and writing go through `oxttl`; terms are converted to and from
//! the core model at the boundary.

use std::fmt;
use std::str::FromStr;

use oxrdf as rdf;
use oxttl::{NTriplesParser, NTriplesSerializer, TurtleParser, TurtleSerializer};
use tracing::info;

use yarspg_core::vocab::{RDF_LANG_STRING, XSD_STRING};
use yarspg_core::{Graph, Iri, Literal, Term, Triple};

use crate::error::{IoError, Result};

/// RDF serializations accepted as serializer input and produced by the parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RdfFormat {
    #[default]
    NTriples,
    Turtle,
}

impl RdfFormat {
    pub fn name(self) -> &'static str {
        match self {
            RdfFormat::NTriples => "ntriples",
            RdfFormat::Turtle => "turtle",
        }
    }
}

impl FromStr for RdfFormat {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "nt" | "ntriples" | "nt11" => Ok(RdfFormat::NTriples),
            "turtle" | "ttl" => Ok(RdfFormat::Turtle),
            _ => Err(IoError::UnsupportedRdfFormat(s.to_string())),
        }
    }
}

impl fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse RDF text into a graph, keeping document order.
pub fn read_graph(text: &str, format: RdfFormat) -> Result<Graph> {
    let mut graph = Graph::new();
    match format {
        RdfFormat::NTriples => {
            for triple in NTriplesParser::new().for_reader(text.as_bytes()) {
                let triple = triple.map_err(|e| IoError::Rdf(e.to_string()))?;
                graph.add(from_rdf(triple)?);
            }
        }
        RdfFormat::Turtle => {
            for triple in TurtleParser::new().for_reader(text.as_bytes()) {
                let triple = triple.map_err(|e| IoError::Rdf(e.to_string()))?;
                graph.add(from_rdf(triple)?);
            }
        }
    }
    info!(%format, triples = graph.len(), "read RDF graph");
    Ok(graph)
}

/// Write a graph as RDF text.
pub fn write_graph(graph: &Graph, format: RdfFormat) -> Result<String> {
    let bytes = match format {
        RdfFormat::NTriples => {
            let mut serializer = NTriplesSerializer::new().for_writer(Vec::new());
            for triple in graph {
                serializer.serialize_triple(&to_rdf(triple)?)?;
            }
            serializer.finish()
        }
        RdfFormat::Turtle => {
            let mut serializer = TurtleSerializer::new().for_writer(Vec::new());
            for triple in graph {
                serializer.serialize_triple(&to_rdf(triple)?)?;
            }
            serializer.finish()?
        }
    };
    String::from_utf8(bytes).map_err(|e| IoError::Rdf(e.to_string()))
}

fn from_rdf(triple: rdf::Triple) -> Result<Triple> {
    let subject = match triple.subject {
        rdf::NamedOrBlankNode::NamedNode(node) => Term::iri(node.into_string()),
        rdf::NamedOrBlankNode::BlankNode(node) => Term::blank(node.as_str()),
    };
    let predicate = Iri::new(triple.predicate.into_string());
    let object = match triple.object {
        rdf::Term::NamedNode(node) => Term::iri(node.into_string()),
        rdf::Term::BlankNode(node) => Term::blank(node.as_str()),
        rdf::Term::Literal(lit) => Term::literal(from_rdf_literal(&lit)),
        #[allow(unreachable_patterns)]
        other => return Err(IoError::InvalidTerm(other.to_string())),
    };
    Ok(Triple::new(subject, predicate, object))
}

fn from_rdf_literal(lit: &rdf::Literal) -> Literal {
    if let Some(language) = lit.language() {
        return Literal::lang(lit.value(), language);
    }
    let datatype = lit.datatype().as_str();
    if datatype == XSD_STRING || datatype == RDF_LANG_STRING {
        Literal::simple(lit.value())
    } else {
        Literal::typed(lit.value(), datatype)
    }
}

fn to_rdf(triple: &Triple) -> Result<rdf::Triple> {
    let subject: rdf::NamedOrBlankNode = match &triple.subject {
        Term::Iri(iri) => rdf::NamedNode::new_unchecked(iri.as_str()).into(),
        Term::BlankNode(label) => blank_node(label)?.into(),
        Term::Literal(lit) => {
            return Err(IoError::InvalidTerm(format!("literal subject {lit}")));
        }
    };
    let predicate = rdf::NamedNode::new_unchecked(triple.predicate.as_str());
    let object: rdf::Term = match &triple.object {
        Term::Iri(iri) => rdf::NamedNode::new_unchecked(iri.as_str()).into(),
        Term::BlankNode(label) => blank_node(label)?.into(),
        Term::Literal(lit) => to_rdf_literal(lit).into(),
    };
    Ok(rdf::Triple::new(subject, predicate, object))
}

fn blank_node(label: &str) -> Result<rdf::BlankNode> {
    rdf::BlankNode::new(label).map_err(|e| IoError::InvalidTerm(format!("blank node '{label}': {e}")))
}

/// A language tag wins over a datatype.
fn to_rdf_literal(lit: &Literal) -> rdf::Literal {
    match (&lit.language, &lit.datatype) {
        (Some(language), _) => {
            rdf::Literal::new_language_tagged_literal_unchecked(&lit.value, language.to_ascii_lowercase())
        }
        (None, Some(datatype)) if datatype != XSD_STRING => {
            rdf::Literal::new_typed_literal(&lit.value, rdf::NamedNode::new_unchecked(datatype))
        }
        _ => rdf::Literal::new_simple_literal(&lit.value),
    }
}
