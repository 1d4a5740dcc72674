//! Triples and the in-memory triple collection.
//!
//! [`Graph`] keeps set semantics (a triple is stored once) while preserving
//! insertion order, so encoders that walk a graph produce the same document
//! for the same input on every run.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::term::{Iri, Term, TermKind};

/// Errors raised while building triples.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TermError {
    #[error("predicate must be an IRI, found {kind}: {value}")]
    NonIriPredicate { kind: TermKind, value: String },
}

/// A subject-predicate-object statement.
///
/// The predicate is typed as an [`Iri`], so a triple with a blank node or
/// literal predicate cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Iri,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Term, predicate: Iri, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// Build a triple from three arbitrary terms, rejecting non-IRI predicates.
    pub fn try_from_terms(subject: Term, predicate: Term, object: Term) -> Result<Self, TermError> {
        match predicate {
            Term::Iri(iri) => Ok(Self::new(subject, iri, object)),
            other => Err(TermError::NonIriPredicate {
                kind: other.kind(),
                value: other.value().to_string(),
            }),
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// Destination for triples produced by a decoder.
pub trait TripleSink {
    /// Accept one triple.
    fn insert(&mut self, triple: Triple);
}

impl TripleSink for Vec<Triple> {
    fn insert(&mut self, triple: Triple) {
        self.push(triple);
    }
}

/// An insertion-ordered set of triples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    triples: IndexSet<Triple>,
}

impl Graph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            triples: IndexSet::new(),
        }
    }

    /// Add a triple. Returns `false` if it was already present.
    pub fn add(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate over triples in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Order-independent comparison of the triple sets.
    pub fn same_triples(&self, other: &Graph) -> bool {
        self.len() == other.len() && self.iter().all(|t| other.contains(t))
    }
}

impl TripleSink for Graph {
    fn insert(&mut self, triple: Triple) {
        self.add(triple);
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Self {
            triples: iter.into_iter().collect(),
        }
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        self.triples.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = indexmap::set::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

impl IntoIterator for Graph {
    type Item = Triple;
    type IntoIter = indexmap::set::IntoIter<Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}
