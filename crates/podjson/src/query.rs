//! Depth-first field lookup.

use crate::node::Node;

/// Finds the first member named `name`, searching `root` in document order.
///
/// The search is pre-order: each member's key is checked before its value is
/// descended into, and a container's children are searched before its later
/// siblings. The root itself has no name and never matches. The returned node
/// is the member's value.
///
/// # Examples
///
/// ```
/// use podjson::{find_by_name, parse};
///
/// let root = parse(r#"{"author":{"id":7},"id":1}"#).unwrap();
/// assert_eq!(find_by_name(&root, "id").and_then(|n| n.as_i64()), Some(7));
/// assert!(find_by_name(&root, "guid").is_none());
/// ```
#[must_use]
pub fn find_by_name<'a>(root: &'a Node, name: &str) -> Option<&'a Node> {
    match root {
        Node::Object(members) => members.iter().find_map(|(key, value)| {
            if key == name {
                Some(value)
            } else {
                find_by_name(value, name)
            }
        }),
        Node::Array(elements) => elements.iter().find_map(|element| find_by_name(element, name)),
        _ => None,
    }
}

/// Searches a chain of sibling roots, such as the pages collected with
/// [`Parser::parse_append`](crate::Parser::parse_append), in order.
#[must_use]
pub fn find_in<'a>(chain: &'a [Node], name: &str) -> Option<&'a Node> {
    chain.iter().find_map(|root| find_by_name(root, name))
}
