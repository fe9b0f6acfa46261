//! Projection of raw `Function` elements into [`FunctionRecord`]s.

use roxmltree::Node;
use tracing::warn;

use qlcm_types::{FunctionId, FunctionRecord};

const ID_ATTR: &str = "ID";
const NAME_ATTR: &str = "Name";
const TYPE_ATTR: &str = "Type";

/// Project a function element into a record.
///
/// Returns `None` if `node` is not an element. A missing or non-numeric `ID`
/// becomes [`FunctionId::DEFAULT`] and the record is flagged with
/// `id_defaulted`; this can make unrelated functions look identifier-equal.
/// `Name` and `Type` default to the empty string.
pub fn project_function(node: Node<'_, '_>) -> Option<FunctionRecord> {
    if !node.is_element() {
        return None;
    }

    let raw_id = node.attribute(ID_ATTR);
    let (id, id_defaulted) = FunctionId::parse_or_default(raw_id);
    let name = node.attribute(NAME_ATTR).unwrap_or_default();
    if id_defaulted {
        warn!(raw = raw_id.unwrap_or(""), function = name, "function id unreadable; using default");
    }

    Some(FunctionRecord {
        id,
        name: name.to_string(),
        kind: node.attribute(TYPE_ATTR).unwrap_or_default().to_string(),
        content: inner_markup(node),
        mapped_id: None,
        id_defaulted,
    })
}

/// The element's child markup, taken verbatim from the source text.
///
/// A text node can merge several raw segments (character data, CDATA,
/// entity references) while its `range()` only covers the first, so text
/// spans run up to the next sibling or the closing tag instead.
/// Whitespace-only text is dropped, so re-indenting a file does not register
/// as a content change.
fn inner_markup(node: Node<'_, '_>) -> String {
    let source = node.document().input_text();
    let close = closing_tag_start(node, source);

    let mut markup = String::new();
    for child in node.children() {
        if child.is_text() {
            let end = child.next_sibling().map_or(close, |next| next.range().start);
            let span = &source[child.range().start..end];
            if !span.trim().is_empty() {
                markup.push_str(span);
            }
        } else {
            markup.push_str(&source[child.range()]);
        }
    }
    markup
}

/// Byte offset of the element's closing tag, or its end if self-closing.
fn closing_tag_start(node: Node<'_, '_>, source: &str) -> usize {
    let range = node.range();
    source[range.clone()]
        .rfind("</")
        .map_or(range.end, |at| range.start + at)
}
