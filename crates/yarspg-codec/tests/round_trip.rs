//! End-to-end encode/decode tests.

use proptest::prelude::*;

use yarspg_codec::{combine, parse, parse_with, serialize, split, value, DecodeOptions};
use yarspg_core::vocab::XSD_INTEGER;
use yarspg_core::{Graph, Iri, Literal, Term, Triple};

fn iri(s: &str) -> Term {
    Term::iri(s)
}

fn graph_of(triples: Vec<Triple>) -> Graph {
    triples.into_iter().collect()
}

/// IRIs built only from characters the decoder leaves untouched.
fn unreserved_iri() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9._~-]{1,12}")
        .unwrap()
        .prop_map(|s| format!("http://example.org/{s}"))
}

fn iri_triple() -> impl Strategy<Value = Triple> {
    (unreserved_iri(), unreserved_iri(), unreserved_iri())
        .prop_map(|(s, p, o)| Triple::new(Term::iri(s), Iri::new(p), Term::iri(o)))
}

proptest! {
    #[test]
    fn unreserved_iri_graphs_round_trip(triples in prop::collection::vec(iri_triple(), 0..16)) {
        let graph = graph_of(triples);
        let decoded = parse(&serialize(&graph).document()).unwrap();
        prop_assert!(decoded.same_triples(&graph));
    }

    #[test]
    fn literal_fragment_escaping_round_trips(v in any::<String>()) {
        let fragment = value::encode(&Term::literal(Literal::simple(v.clone())));
        let props = value::decode(&fragment).unwrap();
        prop_assert_eq!(props.get(value::VALUE_KEY), Some(&v));
    }

    #[test]
    fn literal_document_escaping_round_trips(v in prop::string::string_regex(r#"[a-z \\"\n\t#%()\[\]{}]{0,24}"#).unwrap()) {
        let graph = graph_of(vec![Triple::new(
            iri("http://ex/s"),
            Iri::new("http://ex/p"),
            Term::literal(Literal::simple(v)),
        )]);
        let decoded = parse(&serialize(&graph).document()).unwrap();
        prop_assert!(decoded.same_triples(&graph));
    }

    #[test]
    fn split_then_combine_matches_direct_parse(triples in prop::collection::vec(iri_triple(), 0..8)) {
        let graph = graph_of(triples);
        let document = serialize(&graph).document();
        let parts = split(&document);
        let recombined = combine(&parts.nodes_text(), &parts.edges_text());
        let direct = parse(&document).unwrap();
        let via_sections = parse(&recombined).unwrap();
        prop_assert!(via_sections.same_triples(&direct));
    }
}

#[test]
fn repeated_term_keeps_one_id() {
    let a = iri("http://ex/a");
    let b = iri("http://ex/b");
    let graph = graph_of(vec![
        Triple::new(a.clone(), Iri::new("http://ex/p"), b.clone()),
        Triple::new(b.clone(), Iri::new("http://ex/p"), a.clone()),
    ]);
    let sections = serialize(&graph);

    let records: Vec<_> = sections.nodes.lines().skip(1).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(
        sections.edges.lines().skip(1).collect::<Vec<_>>(),
        vec![
            r#"(s1)-({"IRI"} ["@value": "http://ex/p"])->(o1)"#,
            r#"(o1)-({"IRI"} ["@value": "http://ex/p"])->(s1)"#,
        ]
    );
}

#[test]
fn literal_edge_label_is_dropped() {
    let doc = r#"# Nodes
(s1 {"IRI"} ["@value": "http://ex/s"])
(o1 {"Literal"} ["@value": "v"])
# Edges
(s1)-({"Literal"} ["@value": "http://ex/p"])->(o1)
(s1)-({"IRI"} ["@value": "http://ex/q"])->(o1)
"#;
    let graph = parse(doc).unwrap();
    assert_eq!(graph.len(), 1);
    assert_eq!(graph.iter().next().unwrap().predicate, Iri::new("http://ex/q"));
}

#[test]
fn hello_scenario() {
    let triple = Triple::new(
        iri("http://ex/s"),
        Iri::new("http://ex/p"),
        Term::literal(Literal::simple("hello")),
    );
    let graph = graph_of(vec![triple.clone()]);
    let sections = serialize(&graph);

    let nodes: Vec<_> = sections.nodes.lines().collect();
    assert_eq!(nodes[0], "# Nodes");
    assert!(nodes[1].starts_with(r#"(s1 {"IRI"} ["#) && nodes[1].contains("http://ex/s"));
    assert!(nodes[2].starts_with(r#"(o1 {"Literal"} ["#) && nodes[2].contains(r#""hello""#));

    let edges: Vec<_> = sections.edges.lines().collect();
    assert_eq!(edges[0], "# Edges");
    assert!(edges[1].starts_with(r#"(s1)-({"IRI"} ["#));
    assert!(edges[1].contains("http://ex/p"));
    assert!(edges[1].ends_with("->(o1)"));

    let decoded = parse(&sections.document()).unwrap();
    assert_eq!(decoded.len(), 1);
    assert!(decoded.contains(&triple));
}

#[test]
fn integer_datatype_is_preserved() {
    let triple = Triple::new(
        iri("http://ex/s"),
        Iri::new("http://ex/count"),
        Term::literal(Literal::typed("42", XSD_INTEGER)),
    );
    let decoded = parse(&serialize([&triple]).document()).unwrap();
    let object = &decoded.iter().next().unwrap().object;
    assert_eq!(object.value(), "42");
    assert_eq!(object.datatype(), Some(XSD_INTEGER));
    assert_eq!(object.language(), None);
}

#[test]
fn reserved_iri_characters_come_back_percent_encoded() {
    let original = Triple::new(
        iri("http://ex/search?q=rust&page=2"),
        Iri::new("http://ex/p"),
        iri("http://ex/caf\u{e9}"),
    );
    let sections = serialize([&original]);

    let decoded = parse(&sections.document()).unwrap();
    let triple = decoded.iter().next().unwrap();
    assert_eq!(triple.subject, iri("http://ex/search%3Fq%3Drust%26page%3D2"));
    assert_eq!(triple.object, iri("http://ex/caf%C3%A9"));

    let exact = parse_with(&sections.document(), &DecodeOptions::lossless()).unwrap();
    assert!(exact.contains(&original));
}

#[test]
fn iris_with_quote_or_backslash_survive_reserialization() {
    let document = "# Nodes\n\
                    (s1 {\"IRI\"} [\"@value\": \"http://ex/a\\\"b\"])\n\
                    # Edges\n\
                    (s1)-({\"IRI\"} [\"@value\": \"http://ex/p\"])->(s1)\n";
    let decoded = parse_with(document, &DecodeOptions::lossless()).unwrap();
    let quoted = iri("http://ex/a\"b");
    assert!(decoded.contains(&Triple::new(quoted.clone(), Iri::new("http://ex/p"), quoted)));

    let again = parse_with(&serialize(&decoded).document(), &DecodeOptions::lossless()).unwrap();
    assert!(again.same_triples(&decoded));

    let graph = graph_of(vec![Triple::new(
        iri("http://ex/x\\y"),
        Iri::new("http://ex/p"),
        iri("http://ex/o"),
    )]);
    let decoded = parse_with(&serialize(&graph).document(), &DecodeOptions::lossless()).unwrap();
    assert!(decoded.same_triples(&graph));
}

#[test]
fn blank_nodes_round_trip_when_preserved() {
    let graph = graph_of(vec![
        Triple::new(Term::blank("b0"), Iri::new("http://ex/p"), Term::blank("b1")),
        Triple::new(Term::blank("b1"), Iri::new("http://ex/p"), iri("http://ex/o")),
    ]);
    let document = serialize(&graph).document();

    let exact = parse_with(&document, &DecodeOptions::lossless()).unwrap();
    assert!(exact.same_triples(&graph));

    let lenient = parse(&document).unwrap();
    assert!(lenient.contains(&Triple::new(iri("b0"), Iri::new("http://ex/p"), iri("b1"))));
}

#[test]
fn section_headers_in_any_accepted_spelling() {
    let doc = r#"%NODES
(s1 {"IRI"} ["@value": "http://ex/s"])
(o1 {"IRI"} ["@value": "http://ex/o"])
#edges
(s1)-({"IRI"} ["@value": "http://ex/p"])->(o1)
"#;
    let parts = split(doc);
    assert_eq!(parts.nodes.len(), 2);
    assert_eq!(parts.edges.len(), 1);
    assert_eq!(parse(doc).unwrap().len(), 1);
}

#[test]
fn document_without_edges_section() {
    let graph = parse("# Nodes\n(s1 {\"IRI\"} [\"@value\": \"http://ex/s\"])\n").unwrap();
    assert!(graph.is_empty());
}

#[test]
fn syntax_errors_are_fatal() {
    let err = parse("# Nodes\n(s1 {\"IRI\"} [\"@value\": \"x\"]\n").unwrap_err();
    assert!(matches!(err, yarspg_codec::CodecError::Syntax(_)));
}
