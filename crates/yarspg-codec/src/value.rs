//! Value codec: the attribute fragment inside a node or edge record.
//!
//! A fragment is the comma-separated body of a property list,
//!
//! ```text
//! "@value": "<string>"[, "@datatype": "<iri>"][, "@lang": "<tag>"]
//! ```
//!
//! Decoding wraps the fragment in braces and reads it as a JSON object, so
//! any key order and any extra keys are tolerated.

use std::collections::BTreeMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;
use tracing::warn;

use yarspg_core::{Term, TermKind};

use crate::error::{CodecError, Result};

pub const VALUE_KEY: &str = "@value";
pub const DATATYPE_KEY: &str = "@datatype";
pub const LANG_KEY: &str = "@lang";

/// Decoded property list: key to scalar text.
pub type Properties = BTreeMap<String, String>;

/// Bytes left as-is by [`resolve_iri`]: alphanumerics, `_.-~`, and `:/#`.
const IRI_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b':')
    .remove(b'/')
    .remove(b'#');

/// Escape a literal's lexical form for use inside a quoted fragment value.
///
/// Backslash, newline and double quote are escaped as `\\`, `\n`, `\"`.
/// Carriage return, tab and the remaining C0 controls are escaped too, since
/// a raw control character would make the fragment unreadable.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '"' => out.push_str("\\\""),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Encode a term's payload as an attribute fragment.
pub fn encode(term: &Term) -> String {
    encode_parts(term.kind(), term.value(), term.datatype(), term.language())
}

/// Encode an already-decomposed payload.
///
/// Every value goes through [`escape`]. Well-formed IRIs, blank node labels,
/// datatypes and language tags contain none of the escaped characters, so
/// they come out verbatim.
pub fn encode_parts(
    kind: TermKind,
    value: &str,
    datatype: Option<&str>,
    language: Option<&str>,
) -> String {
    let mut fragment = format!("\"{VALUE_KEY}\": \"{}\"", escape(value));
    if kind == TermKind::Literal {
        if let Some(dt) = datatype {
            fragment.push_str(&format!(", \"{DATATYPE_KEY}\": \"{}\"", escape(dt)));
        }
        if let Some(lang) = language {
            fragment.push_str(&format!(", \"{LANG_KEY}\": \"{}\"", escape(lang)));
        }
    }
    fragment
}

/// Strip one pair of enclosing brackets from a property list, if present.
pub fn strip_brackets(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix('[').unwrap_or(text);
    text.strip_suffix(']').unwrap_or(text)
}

/// Decode a fragment (without brackets) into a property map.
///
/// Strings are taken as-is. Numbers and booleans use their JSON text, nested
/// arrays and objects their compact JSON form, and `null` entries are
/// omitted.
pub fn decode(fragment: &str) -> Result<Properties> {
    let object: serde_json::Map<String, Value> = serde_json::from_str(&format!("{{{fragment}}}"))
        .map_err(|e| CodecError::MalformedPropertyList {
            fragment: fragment.to_string(),
            detail: e.to_string(),
        })?;

    Ok(object
        .into_iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::Null => return None,
                Value::String(s) => s,
                other => other.to_string(),
            };
            Some((key, text))
        })
        .collect())
}

/// Decode a fragment, logging and recovering from malformed input with an
/// empty map.
pub fn decode_or_empty(fragment: &str) -> Properties {
    decode(fragment).unwrap_or_else(|err| {
        warn!(%err, "treating property list as empty");
        Properties::new()
    })
}

/// Percent-encode every byte of `raw` outside the safe set.
///
/// The encoder writes IRIs verbatim, so an IRI containing characters such as
/// `?`, `=`, `%` or non-ASCII text comes back in a different spelling.
pub fn resolve_iri(raw: &str) -> String {
    utf8_percent_encode(raw, IRI_SAFE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use yarspg_core::vocab::XSD_INTEGER;
    use yarspg_core::Literal;

    #[test]
    fn escape_order_prevents_double_escaping() {
        assert_eq!(escape(r#"a\b"#), r#"a\\b"#);
        assert_eq!(escape("line1\nline2"), r#"line1\nline2"#);
        assert_eq!(escape(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape("\\n"), "\\\\n");
    }

    #[test]
    fn escape_other_controls() {
        assert_eq!(escape("a\tb\rc\u{1}"), "a\\tb\\rc\\u0001");
    }

    #[test]
    fn encode_iri_is_verbatim() {
        assert_eq!(
            encode(&Term::iri("http://ex/s?q=1")),
            r#""@value": "http://ex/s?q=1""#
        );
    }

    #[test]
    fn encode_escapes_malformed_iri() {
        let fragment = encode(&Term::iri("http://ex/a\"b\\c"));
        assert_eq!(fragment, r#""@value": "http://ex/a\"b\\c""#);
        assert_eq!(decode(&fragment).unwrap()[VALUE_KEY], "http://ex/a\"b\\c");
    }

    #[test]
    fn encode_blank_node() {
        assert_eq!(encode(&Term::blank("b0")), r#""@value": "b0""#);
    }

    #[test]
    fn encode_typed_and_tagged_literals() {
        assert_eq!(
            encode(&Term::literal(Literal::typed("42", XSD_INTEGER))),
            format!(r#""@value": "42", "@datatype": "{XSD_INTEGER}""#)
        );
        assert_eq!(
            encode(&Term::literal(Literal::lang("bonjour", "fr"))),
            r#""@value": "bonjour", "@lang": "fr""#
        );
    }

    #[test]
    fn encode_literal_with_datatype_and_language() {
        let lit = Literal {
            value: "x".into(),
            datatype: Some("http://ex/dt".into()),
            language: Some("en".into()),
        };
        assert_eq!(
            encode(&Term::literal(lit)),
            r#""@value": "x", "@datatype": "http://ex/dt", "@lang": "en""#
        );
    }

    #[test]
    fn decode_escaped_literal_round_trip() {
        let original = "back\\slash \"quoted\"\nnext line\ttab";
        let fragment = encode(&Term::literal(Literal::simple(original)));
        let props = decode(&fragment).unwrap();
        assert_eq!(props[VALUE_KEY], original);
    }

    #[test]
    fn decode_tolerates_any_subset_and_order() {
        let props = decode(r#""@lang": "de", "@value": "Hallo""#).unwrap();
        assert_eq!(props[VALUE_KEY], "Hallo");
        assert_eq!(props[LANG_KEY], "de");
        assert!(!props.contains_key(DATATYPE_KEY));
    }

    #[test]
    fn decode_non_string_values() {
        let props = decode(r#""n": 42, "b": true, "l": [1, 2], "z": null"#).unwrap();
        assert_eq!(props["n"], "42");
        assert_eq!(props["b"], "true");
        assert_eq!(props["l"], "[1,2]");
        assert!(!props.contains_key("z"));
    }

    #[test]
    fn decode_empty_fragment() {
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn decode_malformed_fragment() {
        let err = decode(r#""@value": "unterminated"#).unwrap_err();
        assert!(matches!(err, CodecError::MalformedPropertyList { .. }));
        assert!(decode_or_empty(r#""@value" "missing colon""#).is_empty());
    }

    #[test]
    fn strip_brackets_removes_one_pair() {
        assert_eq!(strip_brackets(r#"["@value": "x"]"#), r#""@value": "x""#);
        assert_eq!(strip_brackets(r#" ["a": [1]] "#), r#""a": [1]"#);
        assert_eq!(strip_brackets(""), "");
    }

    #[test]
    fn resolve_iri_keeps_safe_characters() {
        assert_eq!(
            resolve_iri("http://example.org/a_b-c.d~e#frag"),
            "http://example.org/a_b-c.d~e#frag"
        );
    }

    #[test]
    fn resolve_iri_percent_encodes_the_rest() {
        assert_eq!(
            resolve_iri("http://ex/search?q=a b&x=%"),
            "http://ex/search%3Fq%3Da%20b%26x%3D%25"
        );
        assert_eq!(resolve_iri("http://ex/café"), "http://ex/caf%C3%A9");
    }
}
