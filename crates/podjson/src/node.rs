//! The parsed JSON tree.
//!
//! A [`Node`] owns its children outright: no subtree is shared and the whole
//! tree is released when the root is dropped. Object members keep their
//! source order and duplicate keys, since pod responses are read by "first
//! match" lookups rather than by map access.

use core::fmt;

use crate::escape::write_escaped;

/// One parsed JSON value.
///
/// # Examples
///
/// ```
/// use podjson::{Kind, Node};
///
/// let node = Node::Object(vec![("id".into(), Node::Number(42))]);
/// assert_eq!(node.kind(), Kind::Object);
/// assert_eq!(node.get("id"), Some(&Node::Number(42)));
/// assert_eq!(node.to_string(), r#"{"id":42}"#);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Node {
    /// `null`.
    #[default]
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// An integer; the pod never sends fractions or exponents.
    Number(i64),
    /// A decoded string.
    String(String),
    /// Elements in source order.
    Array(Vec<Node>),
    /// Members in source order; keys may repeat.
    Object(Vec<(String, Node)>),
}

/// The type of a [`Node`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Kind {
    String,
    Number,
    Bool,
    Null,
    Array,
    Object,
}

impl From<bool> for Node {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Node {
    fn from(v: i64) -> Self {
        Self::Number(v)
    }
}

impl From<String> for Node {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Node {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<Vec<Node>> for Node {
    fn from(v: Vec<Node>) -> Self {
        Self::Array(v)
    }
}

impl Node {
    /// The node's type.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Null => Kind::Null,
            Self::Bool(_) => Kind::Bool,
            Self::Number(_) => Kind::Number,
            Self::String(_) => Kind::String,
            Self::Array(_) => Kind::Array,
            Self::Object(_) => Kind::Object,
        }
    }

    /// Returns `true` for arrays and objects.
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Object(_))
    }

    /// Returns `true` for `[]` and `{}`.
    ///
    /// A paginated listing signals its last page with an empty array.
    #[must_use]
    pub fn is_empty_container(&self) -> bool {
        match self {
            Self::Array(elements) => elements.is_empty(),
            Self::Object(members) => members.is_empty(),
            _ => false,
        }
    }

    /// Returns `true` if the node is [`Null`](Node::Null).
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The string payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric payload.
    ///
    /// `null` reads as `0`: pod responses use `null` for "no id yet" and
    /// every consumer of this tree treats the two the same. Check
    /// [`is_null`](Node::is_null) first when the difference matters.
    ///
    /// ```
    /// use podjson::Node;
    ///
    /// assert_eq!(Node::Null.as_i64(), Some(0));
    /// assert_eq!(Node::Number(-3).as_i64(), Some(-3));
    /// assert_eq!(Node::Bool(true).as_i64(), None);
    /// ```
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Null => Some(0),
            _ => None,
        }
    }

    /// The boolean payload, if this is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Members of an object, in source order.
    #[must_use]
    pub fn members(&self) -> Option<&[(String, Node)]> {
        match self {
            Self::Object(members) => Some(members),
            _ => None,
        }
    }

    /// Elements of an array, in source order.
    #[must_use]
    pub fn elements(&self) -> Option<&[Node]> {
        match self {
            Self::Array(elements) => Some(elements),
            _ => None,
        }
    }

    /// The first direct member named `key`. Unlike
    /// [`find_by_name`](crate::find_by_name) this does not descend.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.members()?
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => f.write_str("null"),
            Node::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Node::Number(n) => write!(f, "{n}"),
            Node::String(s) => {
                f.write_str("\"")?;
                write_escaped(s, f)?;
                f.write_str("\"")
            }
            Node::Array(elements) => {
                f.write_str("[")?;
                for (i, v) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Node::Object(members) => {
                f.write_str("{")?;
                for (i, (k, v)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    f.write_str("\"")?;
                    write_escaped(k, f)?;
                    write!(f, "\":{v}")?;
                }
                f.write_str("}")
            }
        }
    }
}
