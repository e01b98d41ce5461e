//! HTML document layer.
//!
//! Course pages are parsed with html5ever into an [`ArenaDom`] and queried
//! with CSS selectors.
//!
//! # Example
//!
//! ```
//! use lessonkit::dom::{parse_html, select, Selector};
//!
//! let dom = parse_html("<pre><code class=\"language-kotlin\">val x = 1</code></pre>");
//! let code = Selector::parse("pre code").unwrap();
//! let found = select(&dom, &code);
//! assert_eq!(dom.text(found[0]), "val x = 1");
//! ```

mod arena;
mod element_ref;
mod select;
mod serialize;
mod tree_sink;

pub use arena::{ArenaDom, ArenaNode, ArenaNodeData, ArenaNodeId, Attribute, ElementData};
pub use element_ref::{DocSelectors, ElementRef};
pub use select::{Selector, select, select_first, select_within};
pub use serialize::outer_html;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use tree_sink::ArenaSink;

/// Parse an HTML document (or fragment) into an arena DOM.
///
/// Parsing is lenient: malformed markup is recovered the way a browser
/// would, and fragments get the implied `html`/`head`/`body` wrappers.
pub fn parse_html(html: &str) -> ArenaDom {
    let sink = ArenaSink::new();
    parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}
