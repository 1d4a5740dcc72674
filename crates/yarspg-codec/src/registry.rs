//! Encoder-side node registry.
//!
//! Assigns every distinct term a document-local id the first time it is
//! seen. Subjects draw from `s1, s2, …` and objects from `o1, o2, …`; a term
//! keeps whatever id it got first, whichever role it appears in later.

use std::collections::HashMap;
use std::fmt;

use yarspg_core::{Iri, Term, TermKind};

use crate::value;

/// Position of a term in the triple that first introduced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Subject,
    Object,
}

impl Role {
    fn prefix(self) -> char {
        match self {
            Role::Subject => 's',
            Role::Object => 'o',
        }
    }
}

/// Kind label written in a node record's label list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Iri,
    BNode,
    Literal,
}

impl NodeKind {
    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Iri => "IRI",
            NodeKind::BNode => "BNode",
            NodeKind::Literal => "Literal",
        }
    }

    /// Exact, case-sensitive match on a quote-stripped label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "IRI" => Some(NodeKind::Iri),
            "BNode" => Some(NodeKind::BNode),
            "Literal" => Some(NodeKind::Literal),
            _ => None,
        }
    }
}

impl From<TermKind> for NodeKind {
    fn from(kind: TermKind) -> Self {
        match kind {
            TermKind::Iri => NodeKind::Iri,
            TermKind::BlankNode => NodeKind::BNode,
            TermKind::Literal => NodeKind::Literal,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One registered term. Only literal records carry a datatype or language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    pub id: String,
    pub kind: NodeKind,
    pub value: String,
    pub datatype: Option<String>,
    pub language: Option<String>,
}

impl NodeRecord {
    fn from_term(id: String, term: &Term) -> Self {
        Self {
            id,
            kind: term.kind().into(),
            value: term.value().to_string(),
            datatype: term.datatype().map(str::to_string),
            language: term.language().map(str::to_string),
        }
    }

    /// Attribute fragment for this record's property list.
    pub fn fragment(&self) -> String {
        let kind = match self.kind {
            NodeKind::Iri => TermKind::Iri,
            NodeKind::BNode => TermKind::BlankNode,
            NodeKind::Literal => TermKind::Literal,
        };
        value::encode_parts(
            kind,
            &self.value,
            self.datatype.as_deref(),
            self.language.as_deref(),
        )
    }
}

/// One triple, with its endpoints replaced by node ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    pub source: String,
    pub predicate: Iri,
    pub target: String,
}

/// Term to id mapping for a single encode.
#[derive(Debug)]
pub struct NodeRegistry {
    ids: HashMap<Term, usize>,
    records: Vec<NodeRecord>,
    next_subject: usize,
    next_object: usize,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            records: Vec::new(),
            next_subject: 1,
            next_object: 1,
        }
    }

    /// Return the id of `term`, registering it under `role` if it is new.
    ///
    /// `role` only matters on first sight.
    pub fn register(&mut self, term: &Term, role: Role) -> &str {
        let idx = match self.ids.get(term) {
            Some(&idx) => idx,
            None => self.insert(term, role),
        };
        &self.records[idx].id
    }

    fn insert(&mut self, term: &Term, role: Role) -> usize {
        let counter = match role {
            Role::Subject => &mut self.next_subject,
            Role::Object => &mut self.next_object,
        };
        let id = format!("{}{}", role.prefix(), *counter);
        *counter += 1;

        let idx = self.records.len();
        self.records.push(NodeRecord::from_term(id, term));
        self.ids.insert(term.clone(), idx);
        idx
    }

    pub fn get(&self, term: &Term) -> Option<&NodeRecord> {
        self.ids.get(term).map(|&idx| &self.records[idx])
    }

    /// Records in registration order.
    pub fn records(&self) -> &[NodeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yarspg_core::Literal;

    #[test]
    fn ids_follow_first_role() {
        let mut registry = NodeRegistry::new();
        let a = Term::iri("http://ex/a");
        let b = Term::iri("http://ex/b");
        let c = Term::iri("http://ex/c");

        assert_eq!(registry.register(&a, Role::Subject), "s1");
        assert_eq!(registry.register(&b, Role::Object), "o1");
        assert_eq!(registry.register(&b, Role::Subject), "o1");
        assert_eq!(registry.register(&c, Role::Object), "o2");
        assert_eq!(registry.register(&a, Role::Object), "s1");
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn structural_equality_dedupes() {
        let mut registry = NodeRegistry::new();
        let first = Term::literal(Literal::typed("1", "http://ex/dt"));
        let same = Term::literal(Literal::typed("1", "http://ex/dt"));
        let other = Term::literal(Literal::simple("1"));

        registry.register(&first, Role::Object);
        registry.register(&same, Role::Object);
        registry.register(&other, Role::Object);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn records_keep_registration_order() {
        let mut registry = NodeRegistry::new();
        registry.register(&Term::iri("http://ex/z"), Role::Object);
        registry.register(&Term::iri("http://ex/a"), Role::Subject);
        let ids: Vec<_> = registry.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["o1", "s1"]);
    }

    #[test]
    fn record_kinds_and_payload() {
        let mut registry = NodeRegistry::new();
        let lit = Term::literal(Literal::lang("chat", "fr"));
        let blank = Term::blank("b7");
        registry.register(&lit, Role::Object);
        registry.register(&blank, Role::Subject);

        let record = registry.get(&lit).unwrap();
        assert_eq!(record.kind, NodeKind::Literal);
        assert_eq!(record.language.as_deref(), Some("fr"));
        assert_eq!(record.fragment(), r#""@value": "chat", "@lang": "fr""#);

        let record = registry.get(&blank).unwrap();
        assert_eq!(record.kind, NodeKind::BNode);
        assert_eq!(record.datatype, None);
        assert_eq!(record.language, None);
    }

    #[test]
    fn kind_labels() {
        for kind in [NodeKind::Iri, NodeKind::BNode, NodeKind::Literal] {
            assert_eq!(NodeKind::from_label(kind.label()), Some(kind));
        }
        assert_eq!(NodeKind::from_label("iri"), None);
    }
}
