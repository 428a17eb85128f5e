#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use podjson::{
    LineReader, LineReaderOptions, TransportError,
    transport::{Replay, Step},
};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    initial_capacity: u8,
    grow_increment: u8,
    /// Chunk sizes; zero stands for a timeout.
    splits: Vec<u8>,
    data: &'a [u8],
}

fuzz_target!(|input: Input<'_>| {
    let mut steps = Vec::new();
    let mut rest = input.data;
    for &split in &input.splits {
        if rest.is_empty() {
            break;
        }
        if split == 0 {
            steps.push(Step::Timeout);
            continue;
        }
        let (head, tail) = rest.split_at(usize::from(split).min(rest.len()));
        steps.push(Step::Data(head.to_vec()));
        rest = tail;
    }
    if !rest.is_empty() {
        steps.push(Step::Data(rest.to_vec()));
    }

    let mut source = Replay::new(steps);
    let mut reader = LineReader::with_options(LineReaderOptions {
        initial_capacity: usize::from(input.initial_capacity),
        grow_increment: usize::from(input.grow_increment),
        max_line_length: None,
    });

    let mut lines = Vec::new();
    loop {
        match reader.read_line(&mut source, Duration::ZERO) {
            Ok(Some(line)) => lines.push(Vec::from(line)),
            Ok(None) => break,
            Err(TransportError::Timeout(_)) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    // Every terminated line loses its `\n` and one `\r` before it; an
    // unterminated tail comes back unchanged.
    let mut expected: Vec<Vec<u8>> = Vec::new();
    let mut segments = input.data.split(|&b| b == b'\n').peekable();
    while let Some(segment) = segments.next() {
        if segments.peek().is_some() {
            expected.push(segment.strip_suffix(b"\r").unwrap_or(segment).to_vec());
        } else if !segment.is_empty() {
            expected.push(segment.to_vec());
        }
    }
    assert_eq!(lines, expected);
});
