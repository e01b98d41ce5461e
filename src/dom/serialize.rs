//! HTML serialization of arena subtrees.
//!
//! Section content is stored as the markup of its sibling span, so this
//! writes elements back out with their attributes and nesting intact.

use super::arena::{ArenaDom, ArenaNodeData, ArenaNodeId};

/// Elements that never take a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text children are written without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

/// Serialize a node and its subtree.
pub fn outer_html(dom: &ArenaDom, id: ArenaNodeId) -> String {
    let mut out = String::new();
    write_node(dom, id, false, &mut out);
    out
}

fn write_node(dom: &ArenaDom, id: ArenaNodeId, raw_text: bool, out: &mut String) {
    let Some(node) = dom.get(id) else {
        return;
    };

    match &node.data {
        ArenaNodeData::Document => {
            for child in dom.children(id) {
                write_node(dom, child, false, out);
            }
        }
        ArenaNodeData::Doctype { name } => {
            out.push_str("<!DOCTYPE ");
            out.push_str(name);
            out.push('>');
        }
        ArenaNodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        ArenaNodeData::Text(text) => {
            if raw_text {
                out.push_str(text);
            } else {
                escape_into(text, false, out);
            }
        }
        ArenaNodeData::Element(element) => {
            let tag = element.local_name();
            out.push('<');
            out.push_str(tag);
            for attr in element.attrs() {
                out.push(' ');
                out.push_str(attr.name.local.as_ref());
                out.push_str("=\"");
                escape_into(&attr.value, true, out);
                out.push('"');
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&tag) {
                return;
            }

            let raw = RAW_TEXT_ELEMENTS.contains(&tag);
            for child in dom.children(id) {
                write_node(dom, child, raw, out);
            }

            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

/// Escape text per the HTML serialization rules: `&`, no-break space and
/// `<`/`>` in text, `&`, no-break space and `"` in attribute values.
fn escape_into(s: &str, attribute: bool, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attribute => out.push_str("&quot;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
