//! Line framing and JSON tree building for a social pod API client.
//!
//! The crate covers the part of the client that talks bytes: a
//! [`LineReader`] that turns a timeout-bounded byte stream into discrete
//! lines, a recursive-descent [`Parser`] that builds a [`Node`] tree from the
//! JSON the pod returns, depth-first [`find_by_name`] lookup over that tree,
//! and the [`escape`] routine used when composing outgoing JSON bodies.
//!
//! ```rust
//! use podjson::{find_by_name, parse};
//!
//! let root = parse(br#"{"id":42,"name":"Bob"}"#).unwrap();
//! assert_eq!(find_by_name(&root, "id").and_then(|n| n.as_i64()), Some(42));
//! assert_eq!(find_by_name(&root, "name").and_then(|n| n.as_str()), Some("Bob"));
//! ```
//!
//! Only the subset of JSON the pod actually emits is accepted: numbers are
//! integers, and `\v` and `\/` are valid escapes.

mod error;
mod node;
mod options;

pub mod escape;
pub mod extract;
pub mod parser;
pub mod query;
pub mod transport;

#[cfg(feature = "serde")]
mod ser;

#[cfg(test)]
mod tests;

pub use error::{ParserError, SyntaxError, TransportError};
pub use escape::escape;
pub use node::{Kind, Node};
pub use options::{LineReaderOptions, ParserOptions, SurrogateMode};
pub use parser::{
    Parser, parse,
    scanner::{Cursor, Scalar, Scanned, scan_scalar},
};
pub use query::{find_by_name, find_in};
pub use transport::{ByteSource, Chunk, Line, LineReader};
