/// How `\uXXXX` escapes that encode UTF-16 surrogates are decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SurrogateMode {
    /// A high surrogate (`D800`–`DBFF`) must be followed by a `\u` escape
    /// holding a low surrogate (`DC00`–`DFFF`); the pair becomes one scalar
    /// value. Any unpaired surrogate is an error.
    #[default]
    Standard,

    /// Bit-compatible with older pod clients. Only escapes whose high byte is
    /// exactly `D8` start a pair; the following escape is taken as the low
    /// half without a range check and the pair is combined with fixed
    /// offsets. Pairs whose first half lies outside `D800`–`D8FF` are
    /// rejected or mis-decoded.
    Legacy,
}

/// Configuration options for the tree [`Parser`](crate::Parser).
///
/// # Examples
///
/// ```rust
/// use podjson::{Parser, ParserOptions};
///
/// let parser = Parser::new(ParserOptions {
///     strict_containers: true,
///     ..Default::default()
/// });
/// assert!(parser.parse(b"[1, 2").is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParserOptions {
    /// How surrogate pairs in `\u` escapes are combined.
    ///
    /// # Default
    ///
    /// [`SurrogateMode::Standard`]
    pub surrogate_mode: SurrogateMode,

    /// Maximum container nesting depth. The builder recurses once per level,
    /// so this bounds stack use on hostile input.
    ///
    /// # Default
    ///
    /// `256`
    pub max_depth: usize,

    /// Whether an object or array still open at end of input is an error.
    ///
    /// When `false`, end of input closes every open container, which lets a
    /// caller parse a response whose tail was cut off by the transport.
    ///
    /// # Default
    ///
    /// `false`
    pub strict_containers: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            surrogate_mode: SurrogateMode::Standard,
            max_depth: 256,
            strict_containers: false,
        }
    }
}

/// Buffer sizing for a [`LineReader`](crate::LineReader).
#[derive(Debug, Clone, Copy)]
pub struct LineReaderOptions {
    /// Bytes allocated when the reader is created.
    ///
    /// # Default
    ///
    /// `2048`
    pub initial_capacity: usize,

    /// Bytes added each time a line does not fit in the buffer.
    ///
    /// # Default
    ///
    /// `2048`
    pub grow_increment: usize,

    /// Longest line accepted, terminator excluded. `None` lets the buffer
    /// grow for as long as the peer keeps sending.
    ///
    /// # Default
    ///
    /// `Some(16 MiB)`
    pub max_line_length: Option<usize>,
}

/// The line length every POSIX system guarantees.
const LINE_MAX: usize = 2048;

impl Default for LineReaderOptions {
    fn default() -> Self {
        Self {
            initial_capacity: LINE_MAX,
            grow_increment: LINE_MAX,
            max_line_length: Some(16 * 1024 * 1024),
        }
    }
}
