//! Recursive-descent tree builder.
//!
//! Grammar
//! ```text
//! value   := string | number | bool | null | object | array
//! object  := '{' (member (',' member)*)? '}'
//! array   := '[' (value (',' value)*)? ']'
//! member  := string ':' value
//! ```
//!
//! Every leaf goes through [`scanner::scan_scalar`]; the builder itself only
//! deals with structure. A quoted string becomes a member key exactly when the
//! next non-whitespace byte is `:`, which only an object accepts. Anywhere else
//! that `:` is reported as an unexpected character.
//!
//! Each container is one level of recursion, bounded by
//! [`ParserOptions::max_depth`]. On any error the partially built tree is
//! dropped and only the error is returned.

pub mod scanner;
mod unicode;

use crate::{
    error::{ParserError, SyntaxError},
    node::Node,
    options::ParserOptions,
};

use self::scanner::{Cursor, Scalar, scan_scalar};

/// Builds [`Node`] trees from JSON text.
///
/// A `Parser` holds only its options; every call gets its own [`Cursor`], so
/// one parser can be shared freely.
///
/// # Examples
///
/// ```
/// use podjson::{Node, Parser, ParserOptions};
///
/// let parser = Parser::new(ParserOptions::default());
/// let root = parser.parse(b"[1, 2, 3]").unwrap();
/// assert_eq!(
///     root,
///     Node::Array(vec![Node::Number(1), Node::Number(2), Node::Number(3)])
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    options: ParserOptions,
}

impl Parser {
    /// Creates a parser with the given options.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    /// The options this parser was built with.
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parses one complete JSON document.
    ///
    /// Whitespace may surround the value; anything else after it is an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns the first [`SyntaxError`] found, with its position.
    pub fn parse<I>(&self, input: &I) -> Result<Node, ParserError>
    where
        I: AsRef<[u8]> + ?Sized,
    {
        let mut cursor = Cursor::new(input.as_ref());
        self.parse_document(&mut cursor)
    }

    /// Parses one document from a caller-owned cursor, leaving the cursor at
    /// the end of the input.
    ///
    /// # Errors
    ///
    /// Returns the first [`SyntaxError`] found, with its position.
    pub fn parse_document(&self, cursor: &mut Cursor<'_>) -> Result<Node, ParserError> {
        let result = self.value(cursor, 0).and_then(|root| {
            cursor.skip_whitespace();
            if cursor.is_at_end() {
                Ok(root)
            } else {
                Err(cursor.unexpected("end of input"))
            }
        });
        if let Err(err) = &result {
            tracing::debug!(
                offset = err.offset,
                line = err.line,
                column = err.column,
                error = %err.syntax(),
                "rejecting malformed JSON"
            );
        }
        result
    }

    /// Parses one document and appends it to `chain`.
    ///
    /// This is how several pages of a listing are collected: each response is
    /// parsed into the next sibling of a caller-owned chain, which can then be
    /// searched as a whole with [`find_in`](crate::find_in). On error `chain`
    /// is left as it was.
    ///
    /// # Errors
    ///
    /// Returns the first [`SyntaxError`] found, with its position.
    ///
    /// # Examples
    ///
    /// ```
    /// use podjson::{Parser, find_in};
    ///
    /// let parser = Parser::default();
    /// let mut pages = Vec::new();
    /// parser.parse_append(&mut pages, r#"[{"id":1}]"#).unwrap();
    /// parser.parse_append(&mut pages, r#"[{"id":2}]"#).unwrap();
    /// assert!(parser.parse_append(&mut pages, "[{]").is_err());
    /// assert_eq!(pages.len(), 2);
    /// assert_eq!(find_in(&pages, "id").and_then(|n| n.as_i64()), Some(1));
    /// ```
    pub fn parse_append<'c, I>(
        &self,
        chain: &'c mut Vec<Node>,
        input: &I,
    ) -> Result<&'c Node, ParserError>
    where
        I: AsRef<[u8]> + ?Sized,
    {
        let node = self.parse(input)?;
        chain.push(node);
        Ok(&chain[chain.len() - 1])
    }

    fn value(&self, cursor: &mut Cursor<'_>, depth: usize) -> Result<Node, ParserError> {
        cursor.skip_whitespace();
        match cursor.peek() {
            Some(open @ (b'{' | b'[')) => {
                if depth >= self.options.max_depth {
                    return Err(cursor.error(SyntaxError::DepthLimitExceeded(
                        self.options.max_depth,
                    )));
                }
                cursor.bump();
                if open == b'{' {
                    self.object(cursor, depth + 1)
                } else {
                    self.array(cursor, depth + 1)
                }
            }
            None => Err(cursor.unexpected("value")),
            Some(_) => {
                let scanned = scan_scalar(cursor, self.options.surrogate_mode)?;
                Ok(match scanned.value {
                    Scalar::String(s) => Node::String(s),
                    Scalar::Number(n) => Node::Number(n),
                    Scalar::Bool(b) => Node::Bool(b),
                    Scalar::Null => Node::Null,
                })
            }
        }
    }

    fn object(&self, cursor: &mut Cursor<'_>, depth: usize) -> Result<Node, ParserError> {
        let mut members = Vec::new();
        cursor.skip_whitespace();
        match cursor.peek() {
            Some(b'}') => {
                cursor.bump();
                return Ok(Node::Object(members));
            }
            None if !self.options.strict_containers => return Ok(Node::Object(members)),
            _ => {}
        }

        loop {
            cursor.skip_whitespace();
            if cursor.peek() != Some(b'"') {
                return Err(cursor.unexpected("member key"));
            }
            let Scalar::String(key) = scan_scalar(cursor, self.options.surrogate_mode)?.value
            else {
                return Err(cursor.unexpected("member key"));
            };

            cursor.skip_whitespace();
            if cursor.peek() != Some(b':') {
                return Err(cursor.unexpected("':'"));
            }
            cursor.bump();

            let value = self.value(cursor, depth)?;
            members.push((key, value));

            cursor.skip_whitespace();
            match cursor.peek() {
                Some(b',') => cursor.bump(),
                Some(b'}') => {
                    cursor.bump();
                    return Ok(Node::Object(members));
                }
                None if !self.options.strict_containers => return Ok(Node::Object(members)),
                _ => return Err(cursor.unexpected("',' or '}'")),
            }
        }
    }

    fn array(&self, cursor: &mut Cursor<'_>, depth: usize) -> Result<Node, ParserError> {
        let mut elements = Vec::new();
        cursor.skip_whitespace();
        match cursor.peek() {
            Some(b']') => {
                cursor.bump();
                return Ok(Node::Array(elements));
            }
            None if !self.options.strict_containers => return Ok(Node::Array(elements)),
            _ => {}
        }

        loop {
            cursor.skip_whitespace();
            if matches!(cursor.peek(), Some(b',' | b']' | b'}')) {
                return Err(cursor.unexpected("value"));
            }
            elements.push(self.value(cursor, depth)?);

            cursor.skip_whitespace();
            match cursor.peek() {
                Some(b',') => cursor.bump(),
                Some(b']') => {
                    cursor.bump();
                    return Ok(Node::Array(elements));
                }
                None if !self.options.strict_containers => return Ok(Node::Array(elements)),
                _ => return Err(cursor.unexpected("',' or ']'")),
            }
        }
    }
}

/// Parses `input` with default [`ParserOptions`].
///
/// # Errors
///
/// Returns the first [`SyntaxError`] found, with its position.
///
/// # Examples
///
/// ```
/// use podjson::{Node, parse};
///
/// let root = parse(br#"{"id":42,"name":"Bob"}"#).unwrap();
/// assert_eq!(
///     root,
///     Node::Object(vec![
///         ("id".into(), Node::Number(42)),
///         ("name".into(), Node::String("Bob".into())),
///     ])
/// );
/// ```
pub fn parse<I>(input: &I) -> Result<Node, ParserError>
where
    I: AsRef<[u8]> + ?Sized,
{
    Parser::default().parse(input)
}
