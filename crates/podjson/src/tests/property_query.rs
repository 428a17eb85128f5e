use quickcheck_macros::quickcheck;

use crate::{Node, find_by_name, find_in};

/// Every (key, value) pair of the tree in pre-order.
fn members_preorder<'a>(node: &'a Node, out: &mut Vec<(&'a str, &'a Node)>) {
    match node {
        Node::Object(members) => {
            for (key, value) in members {
                out.push((key.as_str(), value));
                members_preorder(value, out);
            }
        }
        Node::Array(elements) => {
            for element in elements {
                members_preorder(element, out);
            }
        }
        _ => {}
    }
}

/// Node identity, so equal values at different places are told apart.
fn addr(node: Option<&Node>) -> Option<*const Node> {
    node.map(std::ptr::from_ref)
}

#[quickcheck]
fn finds_the_first_preorder_member(root: Node, probe: String) -> bool {
    let mut all = Vec::new();
    members_preorder(&root, &mut all);
    let first = |name: &str| all.iter().find(|(k, _)| *k == name).map(|&(_, v)| v);

    all.iter()
        .all(|&(key, _)| addr(find_by_name(&root, key)) == addr(first(key)))
        && addr(find_by_name(&root, &probe)) == addr(first(&probe))
}

#[quickcheck]
fn chain_search_matches_the_first_root_with_a_hit(chain: Vec<Node>, probe: String) -> bool {
    let expected = chain.iter().find_map(|root| find_by_name(root, &probe));
    addr(find_in(&chain, &probe)) == addr(expected)
}
