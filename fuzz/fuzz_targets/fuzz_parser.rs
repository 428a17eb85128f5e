#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use podjson::{Parser, ParserOptions, SurrogateMode};
use serde_json::Value;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    legacy: bool,
    strict: bool,
    max_depth: u8,
    text: &'a [u8],
}

fn has_float(value: &Value) -> bool {
    match value {
        Value::Number(n) => !n.is_i64(),
        Value::Array(a) => a.iter().any(has_float),
        Value::Object(o) => o.values().any(has_float),
        _ => false,
    }
}

fuzz_target!(|input: Input<'_>| {
    let parser = Parser::new(ParserOptions {
        surrogate_mode: if input.legacy {
            SurrogateMode::Legacy
        } else {
            SurrogateMode::Standard
        },
        max_depth: usize::from(input.max_depth),
        strict_containers: input.strict,
    });

    let Ok(tree) = parser.parse(input.text) else {
        return;
    };

    // Rendering is canonical: it parses back to the same tree, and rendering
    // that tree again gives the same text.
    let rendered = tree.to_string();
    let reparsed = Parser::default()
        .parse(&rendered)
        .expect("rendered tree must parse");
    assert_eq!(reparsed, tree);
    assert_eq!(reparsed.to_string(), rendered);

    // Whenever serde_json also accepts the text as integers only, both
    // readings agree.
    if let Ok(theirs) = serde_json::from_slice::<Value>(input.text) {
        if !has_float(&theirs) {
            let ours = serde_json::to_value(&tree).expect("tree serializes");
            assert_eq!(ours, theirs);
        }
    }
});
