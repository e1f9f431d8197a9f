//! Locating ERROR and MISSING nodes in a tree-sitter tree.
//!
//! Tree-sitter always produces a tree; a tree carrying error nodes is
//! treated as a failed parse of the whole file.

use tree_sitter::Node;

/// Returns the first ERROR or MISSING node in document order, if any.
pub fn first_error(root: Node) -> Option<Node> {
    if !root.has_error() {
        return None;
    }
    find_error(root)
}

fn find_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() || child.is_missing() {
            if let Some(found) = find_error(child) {
                return Some(found);
            }
        }
    }
    None
}

/// Count ERROR and MISSING nodes.
pub fn count_errors(root: Node) -> u32 {
    let mut count = 0u32;
    collect_errors(root, &mut count);
    count
}

fn collect_errors(node: Node, count: &mut u32) {
    if node.is_error() || node.is_missing() {
        *count += 1;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_errors(child, count);
    }
}
