//! Decoder configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::value::resolve_iri;

/// How raw IRI text from a property list becomes an IRI term.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IriEncoding {
    /// Percent-encode everything outside the safe set. Not symmetric with
    /// the encoder, which writes IRIs verbatim.
    #[default]
    Percent,
    /// Use the text as-is.
    Verbatim,
}

impl IriEncoding {
    pub fn apply(self, raw: &str) -> String {
        match self {
            IriEncoding::Percent => resolve_iri(raw),
            IriEncoding::Verbatim => raw.to_string(),
        }
    }
}

impl FromStr for IriEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "percent" => Ok(IriEncoding::Percent),
            "verbatim" => Ok(IriEncoding::Verbatim),
            other => Err(format!(
                "unknown IRI encoding '{other}' (expected 'percent' or 'verbatim')"
            )),
        }
    }
}

impl fmt::Display for IriEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IriEncoding::Percent => write!(f, "percent"),
            IriEncoding::Verbatim => write!(f, "verbatim"),
        }
    }
}

/// Options for [`crate::parse_with`] and [`crate::parse_into`].
///
/// The default drops unusable edges silently, decodes `BNode` records as
/// IRIs and percent-encodes IRIs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DecodeOptions {
    /// Return an error for an edge that would otherwise be dropped.
    pub strict_edges: bool,
    /// Decode `BNode` records as blank nodes instead of IRIs.
    pub preserve_blank_nodes: bool,
    pub iri_encoding: IriEncoding,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self {
            strict_edges: true,
            ..Self::default()
        }
    }

    /// Options under which IRIs and blank nodes come back exactly as written.
    pub fn lossless() -> Self {
        Self {
            strict_edges: false,
            preserve_blank_nodes: true,
            iri_encoding: IriEncoding::Verbatim,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_lenient() {
        let options = DecodeOptions::default();
        assert!(!options.strict_edges);
        assert!(!options.preserve_blank_nodes);
        assert_eq!(options.iri_encoding, IriEncoding::Percent);
    }

    #[test]
    fn iri_encoding_apply() {
        assert_eq!(IriEncoding::Percent.apply("http://ex/a b"), "http://ex/a%20b");
        assert_eq!(IriEncoding::Verbatim.apply("http://ex/a b"), "http://ex/a b");
    }

    #[test]
    fn iri_encoding_from_str() {
        assert_eq!("Verbatim".parse::<IriEncoding>(), Ok(IriEncoding::Verbatim));
        assert_eq!("percent".parse::<IriEncoding>(), Ok(IriEncoding::Percent));
        assert!("utf8".parse::<IriEncoding>().is_err());
    }

    #[test]
    fn deserialize_kebab_case_with_defaults() {
        let options: DecodeOptions =
            serde_json::from_str(r#"{"strict-edges": true, "iri-encoding": "verbatim"}"#).unwrap();
        assert!(options.strict_edges);
        assert!(!options.preserve_blank_nodes);
        assert_eq!(options.iri_encoding, IriEncoding::Verbatim);
    }
}
