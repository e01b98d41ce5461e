//! Course page parser.
//!
//! Turns structured HTML pages into [`Chapter`]s: one chapter per file, one
//! lesson per `h1`–`h3` heading.
//!
//! # Example
//!
//! ```
//! use lessonkit::ContentParser;
//!
//! let parser = ContentParser::default();
//! let chapter = parser.parse_html_document(
//!     r#"<h2>Intro</h2><p>Hello</p><pre><code class="language-kotlin">val x = 1</code></pre>"#,
//!     "basics",
//! );
//!
//! assert_eq!(chapter.id, "basics");
//! assert_eq!(chapter.lessons[0].title, "Intro");
//! assert_eq!(chapter.lessons[0].content, "Hello");
//! assert_eq!(chapter.lessons[0].code_example.as_deref(), Some("val x = 1"));
//! ```

mod code;
mod lesson;
mod sections;

pub use code::detect_language;
pub use sections::{SectionSpan, section_spans};

use std::fs;
use std::path::Path;

pub use crate::util::page_stem;

use crate::discover::find_html_files;
use crate::dom::{ArenaDom, Selector, parse_html, select_first};
use crate::error::Result;
use crate::model::{Chapter, ParsedContent};
use crate::slug::slugify;
use crate::util::decode_utf8;

/// Language assumed for code blocks without a `language-*` class.
pub const DEFAULT_LANGUAGE: &str = "kotlin";

/// Starter code given to lessons that have a code example.
pub const STARTER_PLACEHOLDER: &str = "// Write your code here\n";

/// Parser settings. The defaults match the course page markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Element holding the chapter title.
    pub title_selector: String,
    /// Element holding the chapter description.
    pub description_selector: String,
    /// Elements whose text is a code block.
    pub code_selector: String,
    /// Subtrees left out of lesson text.
    pub strip_selector: String,
    /// Deepest heading level that starts a section.
    pub max_heading_level: u8,
    pub default_language: String,
    pub starter_placeholder: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            title_selector: ".page-title".to_string(),
            description_selector: ".page-description".to_string(),
            code_selector: "pre code, .code code".to_string(),
            strip_selector: "pre, .code".to_string(),
            max_heading_level: 3,
            default_language: DEFAULT_LANGUAGE.to_string(),
            starter_placeholder: STARTER_PLACEHOLDER.to_string(),
        }
    }
}

/// Parses course pages into chapters.
///
/// Selectors are compiled once in [`ContentParser::new`]; parsing itself is
/// stateless, so one parser can be reused for a whole docs tree.
#[derive(Debug, Clone)]
pub struct ContentParser {
    config: ParserConfig,
    title: Selector,
    description: Selector,
    code: Selector,
    strip: Selector,
    first_heading: Selector,
    first_paragraph: Selector,
}

impl Default for ContentParser {
    fn default() -> Self {
        Self::new(ParserConfig::default()).expect("default selectors are valid")
    }
}

impl ContentParser {
    pub fn new(config: ParserConfig) -> Result<Self> {
        Ok(Self {
            title: Selector::parse(&config.title_selector)?,
            description: Selector::parse(&config.description_selector)?,
            code: Selector::parse(&config.code_selector)?,
            strip: Selector::parse(&config.strip_selector)?,
            first_heading: Selector::parse("h1")?,
            first_paragraph: Selector::parse("p")?,
            config,
        })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse every `.html` file under `dir`.
    ///
    /// Chapter `order` is the file's position in discovery order. Files that
    /// fail to parse are logged and left out; they still consume their
    /// position, so later chapters keep stable orders.
    pub fn parse_all_html_files(&self, dir: &Path) -> ParsedContent {
        let files = find_html_files(dir);
        tracing::debug!(dir = %dir.display(), files = files.len(), "Discovered course pages");

        let mut chapters = Vec::with_capacity(files.len());
        for (index, path) in files.iter().enumerate() {
            match self.parse_html_file(path) {
                Ok(mut chapter) => {
                    chapter.order = index;
                    chapters.push(chapter);
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to parse course page"
                    );
                }
            }
        }

        ParsedContent { chapters }
    }

    /// Read and parse one page. The returned chapter has `order` 0.
    pub fn parse_html_file(&self, path: &Path) -> Result<Chapter> {
        let html = read_page(path)?;
        let chapter = self.parse_html_document(&html, &page_stem(path));

        tracing::debug!(
            path = %path.display(),
            chapter = %chapter.id,
            lessons = chapter.lessons.len(),
            "Parsed course page"
        );
        Ok(chapter)
    }

    /// Parse page markup into a chapter named after `file_stem`.
    ///
    /// The title comes from the first title element, else the first `h1`,
    /// else the file stem; the description from the first description
    /// element, else the first paragraph, else nothing. An element with
    /// blank text counts as missing.
    pub fn parse_html_document(&self, html: &str, file_stem: &str) -> Chapter {
        let dom = parse_html(html);

        let title = first_text(&dom, &self.title)
            .or_else(|| first_text(&dom, &self.first_heading))
            .unwrap_or_else(|| file_stem.to_string());
        let description = first_text(&dom, &self.description)
            .or_else(|| first_text(&dom, &self.first_paragraph))
            .unwrap_or_default();

        let lessons = self
            .sections_in(&dom)
            .iter()
            .enumerate()
            .map(|(order, section)| self.convert_to_lesson(section, order))
            .collect();

        Chapter {
            id: slugify(file_stem),
            title,
            description,
            lessons,
            order: 0,
        }
    }
}

/// Read a course page as text.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD and logged; only
/// a failed read is an error.
pub fn read_page(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    let (html, malformed) = decode_utf8(&bytes);
    if malformed {
        tracing::warn!(path = %path.display(), "Page is not valid UTF-8; replaced bad bytes");
    }
    Ok(html.into_owned())
}

/// Trimmed text of the first match, if it has any.
fn first_text(dom: &ArenaDom, selector: &Selector) -> Option<String> {
    let id = select_first(dom, selector)?;
    let text = dom.text(id).trim().to_string();
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use proptest::prelude::*;

    use super::*;
    use crate::error::Error;

    #[test]
    fn test_title_and_description_from_page_elements() {
        let parser = ContentParser::default();
        let chapter = parser.parse_html_document(
            r#"<h1>Heading One</h1>
               <div class="page-title"> Coroutines </div>
               <p>First paragraph</p>
               <p class="page-description">All about suspend.</p>"#,
            "03-Coroutines",
        );

        assert_eq!(chapter.id, "03-coroutines");
        assert_eq!(chapter.title, "Coroutines");
        assert_eq!(chapter.description, "All about suspend.");
    }

    #[test]
    fn test_title_falls_back_to_h1_then_stem() {
        let parser = ContentParser::default();

        let chapter = parser.parse_html_document("<h1>Basics</h1><p>Intro text</p>", "x");
        assert_eq!(chapter.title, "Basics");
        assert_eq!(chapter.description, "Intro text");

        let chapter = parser.parse_html_document("<h2>Only h2</h2>", "Flow Basics");
        assert_eq!(chapter.title, "Flow Basics");
        assert_eq!(chapter.id, "flow-basics");
        assert_eq!(chapter.description, "");
    }

    #[test]
    fn test_blank_title_element_counts_as_missing() {
        let parser = ContentParser::default();
        let chapter =
            parser.parse_html_document(r#"<div class="page-title">  </div><h1>Real</h1>"#, "x");

        assert_eq!(chapter.title, "Real");
    }

    #[test]
    fn test_every_heading_becomes_a_lesson() {
        let parser = ContentParser::default();
        let chapter = parser.parse_html_document(
            "<h1>Top</h1><h2>A</h2><p>a</p><h2>A</h2><h3>  </h3>",
            "chapter",
        );

        let ids: Vec<_> = chapter.lessons.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["top-0", "a-1", "a-2", "-3"]);
        let orders: Vec<_> = chapter.lessons.iter().map(|l| l.order).collect();
        assert_eq!(orders, [0, 1, 2, 3]);
    }

    #[test]
    fn test_invalid_selector_config() {
        let result = ContentParser::new(ParserConfig {
            code_selector: "pre code,".into(),
            ..Default::default()
        });
        assert!(matches!(result, Err(Error::InvalidSelector(_))));
    }

    #[test]
    #[cfg(unix)]
    fn test_parse_all_skips_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.html"), "<h1>A</h1><h2>One</h2>").unwrap();
        std::os::unix::fs::symlink(dir.path().join("missing"), dir.path().join("b.html")).unwrap();
        fs::write(dir.path().join("c.html"), "<h1>C</h1>").unwrap();

        let parser = ContentParser::default();
        let content = parser.parse_all_html_files(dir.path());

        let summary: Vec<_> = content
            .chapters
            .iter()
            .map(|c| (c.id.as_str(), c.order))
            .collect();
        assert_eq!(summary, [("a", 0), ("c", 2)]);
    }

    #[test]
    fn test_parse_all_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let content = ContentParser::default().parse_all_html_files(&dir.path().join("docs"));
        assert!(content.chapters.is_empty());
    }

    #[test]
    fn test_parse_all_keeps_page_with_bad_bytes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("cafe.html"),
            b"<h1>Caf\xe9</h1><h2>Intro</h2><p>Hello</p>",
        )
        .unwrap();

        let content = ContentParser::default().parse_all_html_files(dir.path());

        assert_eq!(content.chapters.len(), 1);
        let chapter = &content.chapters[0];
        assert_eq!(chapter.title, "Caf\u{FFFD}");
        let titles: Vec<_> = chapter.lessons.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, ["Caf\u{FFFD}", "Intro"]);
        assert_eq!(chapter.lessons[1].content, "Hello");
    }

    #[test]
    fn test_read_page_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_page(&dir.path().join("gone.html")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    fn heading_text() -> impl Strategy<Value = String> {
        "[A-Za-z0-9][A-Za-z0-9 ]{0,20}"
    }

    proptest! {
        #[test]
        fn prop_n_headings_give_n_sections(
            sections in prop::collection::vec((heading_text(), "[a-z ]{0,40}", any::<bool>()), 1..10)
        ) {
            let body: String = sections
                .iter()
                .enumerate()
                .map(|(i, (heading, text, has_code))| {
                    let code = if *has_code {
                        format!(r#"<pre><code class="language-kotlin">val x = {i}</code></pre>"#)
                    } else {
                        String::new()
                    };
                    format!("<h2>{heading}</h2><p>{text}</p>{code}")
                })
                .collect();
            let html = format!("<html><head><title>Test</title></head><body>{body}</body></html>");

            let parser = ContentParser::default();
            let extracted = parser.extract_sections(&html);

            prop_assert_eq!(extracted.len(), sections.len());
            for (section, (heading, _, has_code)) in extracted.iter().zip(&sections) {
                prop_assert_eq!(&section.heading, heading.trim());
                prop_assert_eq!(section.code_blocks.len(), usize::from(*has_code));
            }
        }

        #[test]
        fn prop_n_sections_give_n_ordered_lessons(n in 1usize..20) {
            let html: String = (0..n)
                .map(|i| format!("<h2>Section {i}</h2><p>Content {i}</p>"))
                .collect();

            let parser = ContentParser::default();
            let sections = parser.extract_sections(&html);
            let lessons: Vec<_> = sections
                .iter()
                .enumerate()
                .map(|(i, s)| parser.convert_to_lesson(s, i))
                .collect();

            prop_assert_eq!(lessons.len(), n);
            for (i, lesson) in lessons.iter().enumerate() {
                prop_assert_eq!(lesson.order, i);
                prop_assert_eq!(&lesson.content, &format!("Content {i}"));
            }
        }

        #[test]
        fn prop_non_empty_code_is_extracted(
            description in "[^<>&]{10,100}",
            code in "[A-Za-z0-9(){}=+ ]{0,40}[A-Za-z0-9(){}=+][A-Za-z0-9(){}=+ ]{0,40}",
        ) {
            let html = format!(
                r#"<div><p>{description}</p><pre><code class="language-kotlin">{code}</code></pre></div>"#
            );

            let blocks = ContentParser::default().extract_code_blocks(&html);
            prop_assert_eq!(blocks.len(), 1);
            prop_assert_eq!(&blocks[0].code, code.trim());
        }
    }
}
