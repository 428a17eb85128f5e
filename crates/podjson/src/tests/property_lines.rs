use std::time::Duration;

use quickcheck::QuickCheck;

use crate::{
    LineReader, LineReaderOptions, Node, parse,
    transport::{Replay, Step},
};

fn tests() -> u64 {
    if is_ci::cached() { 10_000 } else { 1_000 }
}

/// Cuts `bytes` into pieces whose sizes are derived from `splits`.
fn chunk(bytes: &[u8], splits: &[usize]) -> Vec<Step> {
    let mut steps = Vec::new();
    let mut rest = bytes;
    for s in splits {
        if rest.is_empty() {
            break;
        }
        let size = 1 + s % rest.len();
        let (head, tail) = rest.split_at(size);
        steps.push(Step::Data(head.to_vec()));
        rest = tail;
    }
    if !rest.is_empty() {
        steps.push(Step::Data(rest.to_vec()));
    }
    steps
}

fn small_reader() -> LineReader {
    LineReader::with_options(LineReaderOptions {
        initial_capacity: 8,
        grow_increment: 8,
        max_line_length: None,
    })
}

/// Property: rendering a tree on one line, delivering it in arbitrary chunks
/// and parsing the line that comes back gives the same tree.
#[test]
fn chunked_delivery_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Node, splits: Vec<usize>) -> bool {
        let wire = format!("{value}\n");
        let mut source = Replay::new(chunk(wire.as_bytes(), &splits));
        let mut reader = small_reader();
        let Ok(Some(line)) = reader.read_line(&mut source, Duration::from_secs(1)) else {
            return false;
        };
        matches!(reader.read_line(&mut source, Duration::from_secs(1)), Ok(None))
            && parse(&line).is_ok_and(|parsed| parsed == value)
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Node, Vec<usize>) -> bool);
}

/// Property: no byte is dropped or duplicated across reads, whatever the
/// chunking, and timeouts between chunks change nothing.
#[test]
fn lines_survive_any_chunking_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(lines: Vec<Vec<u8>>, splits: Vec<usize>, stalls: Vec<bool>) -> bool {
        let lines: Vec<Vec<u8>> = lines
            .into_iter()
            .map(|l| l.into_iter().filter(|&b| b != b'\n' && b != b'\r').collect())
            .collect();
        let wire: Vec<u8> = lines
            .iter()
            .flat_map(|l| l.iter().copied().chain([b'\n']))
            .collect();

        let mut steps = Vec::new();
        for (i, step) in chunk(&wire, &splits).into_iter().enumerate() {
            if stalls.get(i).copied().unwrap_or(false) {
                steps.push(Step::Timeout);
            }
            steps.push(step);
        }
        let mut source = Replay::new(steps);
        let mut reader = small_reader();

        let mut got = Vec::new();
        loop {
            match reader.read_line(&mut source, Duration::ZERO) {
                Ok(Some(line)) => got.push(Vec::from(line)),
                Ok(None) => break,
                Err(crate::TransportError::Timeout(_)) => {}
                Err(_) => return false,
            }
        }
        got == lines
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<Vec<u8>>, Vec<usize>, Vec<bool>) -> bool);
}

/// Property: with a length limit, every line either comes back intact or is
/// replaced by exactly one `LineTooLong`; the lines around it are unaffected.
#[test]
fn overlong_lines_are_skipped_quickcheck() {
    const LIMIT: usize = 6;

    #[allow(clippy::needless_pass_by_value)]
    fn prop(lines: Vec<Vec<u8>>, splits: Vec<usize>) -> bool {
        let lines: Vec<Vec<u8>> = lines
            .into_iter()
            .map(|l| l.into_iter().filter(|&b| b != b'\n' && b != b'\r').collect())
            .collect();
        let wire: Vec<u8> = lines
            .iter()
            .flat_map(|l| l.iter().copied().chain([b'\n']))
            .collect();
        let expected: Vec<Option<Vec<u8>>> = lines
            .into_iter()
            .map(|l| (l.len() <= LIMIT).then_some(l))
            .collect();

        let mut source = Replay::new(chunk(&wire, &splits));
        let mut reader = LineReader::with_options(LineReaderOptions {
            initial_capacity: 4,
            grow_increment: 3,
            max_line_length: Some(LIMIT),
        });

        let mut got = Vec::new();
        loop {
            match reader.read_line(&mut source, Duration::ZERO) {
                Ok(Some(line)) => got.push(Some(Vec::from(line))),
                Ok(None) => break,
                Err(crate::TransportError::LineTooLong { limit: LIMIT }) => got.push(None),
                Err(_) => return false,
            }
        }
        got == expected
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<Vec<u8>>, Vec<usize>) -> bool);
}
