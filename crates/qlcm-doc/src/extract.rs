//! Container lookup and function enumeration.

use roxmltree::{Document, Node};

/// Tag of the element grouping all function definitions.
pub const CONTAINER_TAG: &str = "Engine";

/// Tag of a single function definition.
pub const FUNCTION_TAG: &str = "Function";

/// Locate the function container and return every `Function` element beneath it.
///
/// The container is the first `Engine` element strictly below the document
/// root. Functions are collected at any depth beneath it, in document order.
/// Returns `None` when there is no container. Tags are matched by local name,
/// so a default namespace on the workspace does not interfere.
pub fn find_functions<'a, 'input>(doc: &'a Document<'input>) -> Option<Vec<Node<'a, 'input>>> {
    let root = doc.root_element();
    let container = root
        .descendants()
        .filter(|n| *n != root)
        .find(|n| is_tagged(n, CONTAINER_TAG))?;

    Some(
        container
            .descendants()
            .filter(|n| *n != container && is_tagged(n, FUNCTION_TAG))
            .collect(),
    )
}

fn is_tagged(node: &Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && node.tag_name().name() == tag
}
