//! Compiled CSS selector lists and document-order queries.

use cssparser::{Parser, ParserInput};
use selectors::context::{MatchingContext, SelectorCaches};
use selectors::matching::{MatchingForInvalidation, MatchingMode, NeedsSelectorFlags};
use selectors::parser::{ParseRelative, SelectorList};

use super::arena::{ArenaDom, ArenaNodeId};
use super::element_ref::{DocSelectors, ElementRef};
use crate::error::{Error, Result};

/// A parsed, comma-separated selector list such as `pre code, .code code`.
#[derive(Debug, Clone)]
pub struct Selector {
    list: SelectorList<DocSelectors>,
}

impl Selector {
    /// Parse a selector list. Anything the selectors crate rejects
    /// (pseudo-classes included) is an [`Error::InvalidSelector`].
    pub fn parse(source: &str) -> Result<Self> {
        let mut input = ParserInput::new(source);
        let mut parser = Parser::new(&mut input);
        let list = SelectorList::parse(&DocSelectors, &mut parser, ParseRelative::No)
            .map_err(|e| Error::InvalidSelector(format!("{source:?}: {:?}", e.kind)))?;
        Ok(Self { list })
    }

    /// Whether the element `id` matches any selector in the list.
    pub fn matches(&self, dom: &ArenaDom, id: ArenaNodeId) -> bool {
        if !dom.is_element(id) {
            return false;
        }
        let element = ElementRef::new(dom, id);
        let mut caches = SelectorCaches::default();
        let mut context = MatchingContext::new(
            MatchingMode::Normal,
            None,
            &mut caches,
            selectors::context::QuirksMode::NoQuirks,
            NeedsSelectorFlags::No,
            MatchingForInvalidation::No,
        );
        self.list.slice().iter().any(|selector| {
            selectors::matching::matches_selector(selector, 0, None, &element, &mut context)
        })
    }
}

/// All elements under `root` matching `selector`, in document order.
pub fn select_within(dom: &ArenaDom, root: ArenaNodeId, selector: &Selector) -> Vec<ArenaNodeId> {
    dom.descendants(root)
        .into_iter()
        .filter(|&id| selector.matches(dom, id))
        .collect()
}

/// All elements in the document matching `selector`, in document order.
pub fn select(dom: &ArenaDom, selector: &Selector) -> Vec<ArenaNodeId> {
    select_within(dom, dom.document(), selector)
}

/// First element in document order matching `selector`.
pub fn select_first(dom: &ArenaDom, selector: &Selector) -> Option<ArenaNodeId> {
    dom.descendants(dom.document())
        .into_iter()
        .find(|&id| selector.matches(dom, id))
}
