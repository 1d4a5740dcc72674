//! Splitting a document into its Nodes and Edges sections and putting it
//! back together.
//!
//! Headers are matched case-insensitively and may be written `#Nodes`,
//! `# Nodes`, `%Nodes` or `% Nodes` (likewise for Edges).

use crate::writer::{EDGES_HEADER, NODES_HEADER};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Nodes,
    Edges,
}

/// Classify a line as a section header.
pub fn section_header(line: &str) -> Option<Section> {
    let lower = line.trim().to_lowercase();
    let rest = lower
        .strip_prefix('#')
        .or_else(|| lower.strip_prefix('%'))?;
    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    if rest.starts_with("nodes") {
        Some(Section::Nodes)
    } else if rest.starts_with("edges") {
        Some(Section::Edges)
    } else {
        None
    }
}

/// Record lines of each section, whitespace-stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitDocument {
    pub nodes: Vec<String>,
    pub edges: Vec<String>,
}

impl SplitDocument {
    pub fn nodes_text(&self) -> String {
        self.nodes.join("\n")
    }

    pub fn edges_text(&self) -> String {
        self.edges.join("\n")
    }

    /// Reassemble into one document with synthesized headers.
    pub fn combine(&self) -> String {
        combine(&self.nodes_text(), &self.edges_text())
    }
}

/// Split a document by its headers.
///
/// Lines before the first header and blank lines are ignored. A missing
/// section yields no records.
pub fn split(document: &str) -> SplitDocument {
    let mut split = SplitDocument::default();
    let mut current = None;

    for line in document.lines() {
        if let Some(section) = section_header(line) {
            current = Some(section);
            continue;
        }
        let record = line.trim();
        if record.is_empty() {
            continue;
        }
        match current {
            Some(Section::Nodes) => split.nodes.push(record.to_string()),
            Some(Section::Edges) => split.edges.push(record.to_string()),
            None => {}
        }
    }

    split
}

/// Join independently stored section bodies into one document.
pub fn combine(nodes: &str, edges: &str) -> String {
    format!("{NODES_HEADER}\n{nodes}\n{EDGES_HEADER}\n{edges}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_variants() {
        for line in ["#Nodes", "# Nodes", "%Nodes", "% nodes", "  # NODES  "] {
            assert_eq!(section_header(line), Some(Section::Nodes), "{line}");
        }
        for line in ["#Edges", "# edges", "%EDGES", "% Edges"] {
            assert_eq!(section_header(line), Some(Section::Edges), "{line}");
        }
        for line in ["Nodes", "#  Nodes", "# Metadata", "(n1)"] {
            assert_eq!(section_header(line), None, "{line}");
        }
    }

    #[test]
    fn split_collects_records() {
        let doc = "preamble\n# Nodes\n  (a)  \n\n(b)\n% Edges\n(a)-({\"IRI\"})->(b)\n";
        let split = split(doc);
        assert_eq!(split.nodes, vec!["(a)", "(b)"]);
        assert_eq!(split.edges, vec!["(a)-({\"IRI\"})->(b)"]);
    }

    #[test]
    fn missing_section_is_empty() {
        let split = split("# Nodes\n(a)\n");
        assert!(split.edges.is_empty());
        assert_eq!(split.nodes_text(), "(a)");
    }

    #[test]
    fn combine_format() {
        assert_eq!(combine("(a)", "(a)-()->(a)"), "# Nodes\n(a)\n# Edges\n(a)-()->(a)");
        let split = split("%nodes\n(a)\n(b)\n#edges\n");
        assert_eq!(split.combine(), "# Nodes\n(a)\n(b)\n# Edges\n");
    }
}
