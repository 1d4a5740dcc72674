//! Decoder-side node table.

use std::collections::HashMap;

use crate::value::{Properties, DATATYPE_KEY, LANG_KEY, VALUE_KEY};

/// A declared node: its quote-stripped kind label and decoded properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeEntry {
    pub kind: Option<String>,
    pub properties: Properties,
}

impl NodeEntry {
    pub fn new(kind: Option<&str>, properties: Properties) -> Self {
        Self {
            kind: kind.map(str::to_string),
            properties,
        }
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.properties.get(VALUE_KEY).map(String::as_str)
    }

    pub fn datatype(&self) -> Option<&str> {
        self.properties.get(DATATYPE_KEY).map(String::as_str)
    }

    pub fn language(&self) -> Option<&str> {
        self.properties.get(LANG_KEY).map(String::as_str)
    }
}

/// Node id to entry, filled in document order.
#[derive(Debug, Clone, Default)]
pub struct NodeTable {
    entries: HashMap<String, NodeEntry>,
}

impl NodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `id`. Returns the entry it replaced.
    pub fn insert(&mut self, id: impl Into<String>, entry: NodeEntry) -> Option<NodeEntry> {
        self.entries.insert(id.into(), entry)
    }

    pub fn get(&self, id: &str) -> Option<&NodeEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
