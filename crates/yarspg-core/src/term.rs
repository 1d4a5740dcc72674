//! RDF terms: IRIs, blank nodes, and literals.
//!
//! Terms are immutable values compared by structure. Two terms are the same
//! term when they have the same kind and the same field values, which is
//! what the encoder relies on to de-duplicate node identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An IRI reference, stored exactly as it was supplied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Iri(String);

impl Iri {
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

impl From<&str> for Iri {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A literal value with an optional datatype IRI and language tag.
///
/// A plain string literal carries neither. Language-tagged literals leave the
/// datatype empty rather than spelling out `rdf:langString`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    pub value: String,
    pub datatype: Option<String>,
    pub language: Option<String>,
}

impl Literal {
    /// Create a plain literal with no datatype and no language tag.
    pub fn simple(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: None,
            language: None,
        }
    }

    /// Create a literal with an explicit datatype IRI.
    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    /// Create a language-tagged literal.
    pub fn lang(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.value)?;
        if let Some(lang) = &self.language {
            write!(f, "@{lang}")?;
        }
        if let Some(dt) = &self.datatype {
            write!(f, "^^<{dt}>")?;
        }
        Ok(())
    }
}

/// The three kinds of graph term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermKind {
    Iri,
    BlankNode,
    Literal,
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermKind::Iri => write!(f, "IRI"),
            TermKind::BlankNode => write!(f, "BlankNode"),
            TermKind::Literal => write!(f, "Literal"),
        }
    }
}

/// A triple component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    Iri(Iri),
    /// Blank node label, without the `_:` prefix.
    BlankNode(String),
    Literal(Literal),
}

impl Term {
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(Iri::new(iri))
    }

    pub fn blank(label: impl Into<String>) -> Self {
        Term::BlankNode(label.into())
    }

    pub fn literal(literal: Literal) -> Self {
        Term::Literal(literal)
    }

    pub fn kind(&self) -> TermKind {
        match self {
            Term::Iri(_) => TermKind::Iri,
            Term::BlankNode(_) => TermKind::BlankNode,
            Term::Literal(_) => TermKind::Literal,
        }
    }

    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    /// The scalar payload: IRI text, blank node label, or literal lexical form.
    pub fn value(&self) -> &str {
        match self {
            Term::Iri(iri) => iri.as_str(),
            Term::BlankNode(label) => label,
            Term::Literal(lit) => &lit.value,
        }
    }

    /// Datatype IRI of a literal. Always `None` for IRIs and blank nodes.
    pub fn datatype(&self) -> Option<&str> {
        match self {
            Term::Literal(lit) => lit.datatype.as_deref(),
            _ => None,
        }
    }

    /// Language tag of a literal. Always `None` for IRIs and blank nodes.
    pub fn language(&self) -> Option<&str> {
        match self {
            Term::Literal(lit) => lit.language.as_deref(),
            _ => None,
        }
    }

    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "{iri}"),
            Term::BlankNode(label) => write!(f, "_:{label}"),
            Term::Literal(lit) => write!(f, "{lit}"),
        }
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Term::Iri(iri)
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Literal(lit)
    }
}
