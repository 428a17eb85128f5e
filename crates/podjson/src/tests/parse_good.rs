use rstest::rstest;

use crate::{Node, Parser, ParserOptions, find_by_name, parse};

fn obj(members: &[(&str, Node)]) -> Node {
    Node::Object(
        members
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect(),
    )
}

fn arr(elements: &[Node]) -> Node {
    Node::Array(elements.to_vec())
}

fn s(text: &str) -> Node {
    Node::String(text.to_owned())
}

/// Converts a `serde_json` value into a tree, for documents that hold only
/// integers.
fn from_serde(value: &serde_json::Value) -> Node {
    match value {
        serde_json::Value::Null => Node::Null,
        serde_json::Value::Bool(b) => Node::Bool(*b),
        serde_json::Value::Number(n) => Node::Number(n.as_i64().unwrap()),
        serde_json::Value::String(s) => Node::String(s.clone()),
        serde_json::Value::Array(a) => Node::Array(a.iter().map(from_serde).collect()),
        serde_json::Value::Object(o) => Node::Object(
            o.iter()
                .map(|(k, v)| (k.clone(), from_serde(v)))
                .collect(),
        ),
    }
}

#[test]
fn object_members_in_order() {
    assert_eq!(
        parse(r#"{"id":42,"name":"Bob"}"#).unwrap(),
        obj(&[("id", Node::Number(42)), ("name", s("Bob"))])
    );
}

#[test]
fn array_of_numbers() {
    assert_eq!(
        parse("[1,2,3]").unwrap(),
        arr(&[Node::Number(1), Node::Number(2), Node::Number(3)])
    );
}

#[rstest]
#[case("42", Node::Number(42))]
#[case("-7", Node::Number(-7))]
#[case(r#""solo""#, s("solo"))]
#[case("true", Node::Bool(true))]
#[case("null", Node::Null)]
#[case("{}", obj(&[]))]
#[case("[]", arr(&[]))]
#[case(" \t\r\n [ ] \n", arr(&[]))]
#[case("[[[]]]", arr(&[arr(&[arr(&[])])]))]
#[case(r#"[{"a":[{"b":null}]}]"#, arr(&[obj(&[("a", arr(&[obj(&[("b", Node::Null)])]))])]))]
#[case(r#"{"k" : "v" , "n":{ }}"#, obj(&[("k", s("v")), ("n", obj(&[]))]))]
#[case(r#"{"dup":1,"dup":2}"#, obj(&[("dup", Node::Number(1)), ("dup", Node::Number(2))]))]
#[case("[\u{b}1\u{c},2]", arr(&[Node::Number(1), Node::Number(2)]))]
fn builds_trees(#[case] input: &str, #[case] expected: Node) {
    assert_eq!(parse(input).unwrap(), expected);
}

#[rstest]
#[case("[1, 2", arr(&[Node::Number(1), Node::Number(2)]))]
#[case("[", arr(&[]))]
#[case(r#"{"a":{"b":[1"#, obj(&[("a", obj(&[("b", arr(&[Node::Number(1)]))]))]))]
#[case(r#"{"a":1"#, obj(&[("a", Node::Number(1))]))]
fn end_of_input_closes_open_containers(#[case] input: &str, #[case] expected: Node) {
    assert_eq!(parse(input).unwrap(), expected);
}

#[test]
fn visits_every_member_in_source_order() {
    let root = parse(r#"{"c":3,"a":1,"b":[4,5,{"d":6}]}"#).unwrap();
    let keys: Vec<&str> = root
        .members()
        .unwrap()
        .iter()
        .map(|(k, _)| k.as_str())
        .collect();
    assert_eq!(keys, ["c", "a", "b"]);
    assert_eq!(root.to_string(), r#"{"c":3,"a":1,"b":[4,5,{"d":6}]}"#);
}

#[test]
fn escapes_inside_keys_and_values() {
    let root = parse(r#"{"café":"tab\there","\/":"😀"}"#).unwrap();
    assert_eq!(root.get("café").and_then(Node::as_str), Some("tab\there"));
    assert_eq!(root.get("/").and_then(Node::as_str), Some("😀"));
}

#[test]
fn byte_input_is_accepted() {
    let bytes: Vec<u8> = br#"{"ok":true}"#.to_vec();
    assert_eq!(parse(&bytes).unwrap(), obj(&[("ok", Node::Bool(true))]));
}

#[test]
fn parser_can_be_reused() {
    let parser = Parser::new(ParserOptions::default());
    for n in 0..3 {
        let root = parser.parse(&format!("[{n}]")).unwrap();
        assert_eq!(root, arr(&[Node::Number(n)]));
    }
}

#[test]
fn append_mode_collects_pages() {
    let parser = Parser::default();
    let mut pages = Vec::new();
    let pages_text = [
        r#"[{"conversation":{"id":10,"subject":"first"}}]"#,
        r#"[{"conversation":{"id":11,"subject":"second"}}]"#,
        "[]",
    ];
    for text in pages_text {
        let page = parser.parse_append(&mut pages, text).unwrap();
        if page.is_empty_container() {
            break;
        }
    }
    assert_eq!(pages.len(), 3);
    assert!(pages[2].is_empty_container());
    assert_eq!(
        crate::find_in(&pages[1..], "subject").and_then(Node::as_str),
        Some("second")
    );
}

#[test]
fn failed_append_leaves_the_chain_alone() {
    let parser = Parser::default();
    let mut pages = vec![parse("[1]").unwrap()];
    assert!(parser.parse_append(&mut pages, "[1,]").is_err());
    assert_eq!(pages, [arr(&[Node::Number(1)])]);
}

#[test]
fn deep_nesting_up_to_the_limit() {
    let parser = Parser::new(ParserOptions {
        max_depth: 64,
        ..Default::default()
    });
    let text = format!("{}{}", "[".repeat(64), "]".repeat(64));
    let mut node = &parser.parse(&text).unwrap();
    let mut depth = 1;
    while let Some([child]) = node.elements() {
        node = child;
        depth += 1;
    }
    assert_eq!(depth, 64);
}

#[test]
fn null_fields_read_as_zero() {
    let root = parse(r#"{"author_id":null}"#).unwrap();
    let field = find_by_name(&root, "author_id").unwrap();
    assert!(field.is_null());
    assert_eq!(field.as_i64(), Some(0));
}

#[rstest]
#[case(r#"{"id":1,"guid":"a1b2","public":true,"tags":["x","y"],"parent":null}"#)]
#[case(r#"[{"id":-9223372036854775808},{"id":9223372036854775807}]"#)]
#[case(r#"{"nested":{"deeper":{"deepest":[[],{},[{}]]}}}"#)]
#[case(r#"{"text":"line\nbreak \"quoted\" back\\slash ümläut"}"#)]
#[case(r#"{"emoji":"🎉 party"}"#)]
fn agrees_with_serde_json(#[case] input: &str) {
    let ours = parse(input).unwrap();
    let theirs: serde_json::Value = serde_json::from_str(input).unwrap();
    assert_eq!(ours, from_serde(&theirs));
}
