//! Heading-delimited section extraction.

use std::collections::HashMap;
use std::ops::Range;

use crate::dom::{ArenaDom, ArenaNodeId, outer_html};
use crate::model::Section;

use super::ContentParser;

/// Where one section sits inside an ordered list of sibling elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpan {
    /// Index of the heading element.
    pub heading: usize,
    pub level: u8,
    /// Siblings that make up the section body; may be empty.
    pub body: Range<usize>,
}

/// Compute section spans over a sibling list.
///
/// `levels[i]` is the boundary level of sibling `i`, or `None` when it is
/// ordinary content. Every heading yields one span whose body runs until
/// the next heading of the same or a numerically lower level.
pub fn section_spans(levels: &[Option<u8>]) -> Vec<SectionSpan> {
    levels
        .iter()
        .enumerate()
        .filter_map(|(heading, level)| {
            let level = (*level)?;
            let end = levels[heading + 1..]
                .iter()
                .position(|l| l.is_some_and(|l| l <= level))
                .map_or(levels.len(), |offset| heading + 1 + offset);
            Some(SectionSpan {
                heading,
                level,
                body: heading + 1..end,
            })
        })
        .collect()
}

/// Siblings of one parent with their precomputed spans.
struct SiblingRun {
    siblings: Vec<ArenaNodeId>,
    spans: Vec<SectionSpan>,
}

impl ContentParser {
    /// Split an HTML document into sections, one per `h1`–`h3` heading in
    /// document order.
    pub fn extract_sections(&self, html: &str) -> Vec<Section> {
        let dom = crate::dom::parse_html(html);
        self.sections_in(&dom)
    }

    pub(crate) fn sections_in(&self, dom: &ArenaDom) -> Vec<Section> {
        let mut runs: HashMap<ArenaNodeId, SiblingRun> = HashMap::new();
        let mut sections = Vec::new();

        for heading in dom.descendants(dom.document()) {
            if self.boundary_level(dom, heading).is_none() {
                continue;
            }
            let Some(parent) = dom.get(heading).map(|n| n.parent) else {
                continue;
            };

            let run = runs
                .entry(parent)
                .or_insert_with(|| self.sibling_run(dom, parent));
            let Some(span) = run
                .spans
                .iter()
                .find(|span| run.siblings[span.heading] == heading)
            else {
                continue;
            };

            let content: String = run.siblings[span.body.clone()]
                .iter()
                .map(|&id| outer_html(dom, id))
                .collect();
            let code_blocks = self.extract_code_blocks(&content);

            sections.push(Section {
                heading: dom.text(heading).trim().to_string(),
                level: span.level,
                content,
                code_blocks,
            });
        }

        sections
    }

    fn sibling_run(&self, dom: &ArenaDom, parent: ArenaNodeId) -> SiblingRun {
        let siblings = dom.element_children(parent);
        let levels: Vec<_> = siblings
            .iter()
            .map(|&id| self.boundary_level(dom, id))
            .collect();
        SiblingRun {
            spans: section_spans(&levels),
            siblings,
        }
    }

    fn boundary_level(&self, dom: &ArenaDom, id: ArenaNodeId) -> Option<u8> {
        dom.heading_level(id)
            .filter(|&level| level <= self.config.max_heading_level)
    }
}
