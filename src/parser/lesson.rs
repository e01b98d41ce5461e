//! Section to lesson conversion.

use crate::dom::parse_html;
use crate::model::{Lesson, Section};
use crate::slug::lesson_id;

use super::ContentParser;

impl ContentParser {
    /// Turn a section into the lesson at position `order` of its chapter.
    ///
    /// The lesson text is the section's plain text with code blocks cut out.
    /// The first code block becomes the example; the editor then starts
    /// from the configured placeholder instead of the example itself.
    pub fn convert_to_lesson(&self, section: &Section, order: usize) -> Lesson {
        let dom = parse_html(&section.content);
        let content = dom
            .text_excluding(dom.document(), |id| self.strip.matches(&dom, id))
            .trim()
            .to_string();

        let code_example = section.code_blocks.first().map(|block| block.code.clone());
        let initial_code = code_example
            .as_ref()
            .map(|_| self.config.starter_placeholder.clone());

        Lesson {
            id: lesson_id(&section.heading, order),
            title: section.heading.clone(),
            content,
            code_example,
            initial_code,
            order,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CodeBlock;
    use crate::parser::STARTER_PLACEHOLDER;

    fn section(heading: &str, content: &str, code: &[&str]) -> Section {
        Section {
            heading: heading.to_string(),
            level: 2,
            content: content.to_string(),
            code_blocks: code
                .iter()
                .map(|c| CodeBlock {
                    language: "kotlin".into(),
                    code: c.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_intro_lesson() {
        let parser = ContentParser::default();
        let lesson = parser.convert_to_lesson(
            &section(
                "Intro",
                r#"<p>Hello</p><pre><code class="language-kotlin">val x = 1</code></pre>"#,
                &["val x = 1"],
            ),
            0,
        );

        assert_eq!(lesson.id, "intro-0");
        assert_eq!(lesson.title, "Intro");
        assert_eq!(lesson.content, "Hello");
        assert_eq!(lesson.code_example.as_deref(), Some("val x = 1"));
        assert_eq!(lesson.initial_code.as_deref(), Some(STARTER_PLACEHOLDER));
        assert_eq!(lesson.order, 0);
        assert!(lesson.validation.is_none());
        assert!(lesson.hint.is_none());
    }

    #[test]
    fn test_no_code_no_starter() {
        let parser = ContentParser::default();
        let lesson = parser.convert_to_lesson(&section("Theory", "<p>Just words.</p>", &[]), 4);

        assert_eq!(lesson.id, "theory-4");
        assert_eq!(lesson.content, "Just words.");
        assert!(lesson.code_example.is_none());
        assert!(lesson.initial_code.is_none());
    }

    #[test]
    fn test_code_container_stripped_from_text() {
        let parser = ContentParser::default();
        let lesson = parser.convert_to_lesson(
            &section(
                "Mixed",
                r#"<p>Before</p><div class="code"><code>hidden()</code></div><p>After <code>inline</code></p>"#,
                &["hidden()"],
            ),
            1,
        );

        assert_eq!(lesson.content, "BeforeAfter inline");
    }

    #[test]
    fn test_first_block_wins() {
        let parser = ContentParser::default();
        let lesson = parser.convert_to_lesson(&section("Two", "", &["first", "second"]), 2);

        assert_eq!(lesson.code_example.as_deref(), Some("first"));
    }

    #[test]
    fn test_empty_section() {
        let parser = ContentParser::default();
        let lesson = parser.convert_to_lesson(&section("Empty", "", &[]), 0);

        assert_eq!(lesson.content, "");
        assert_eq!(lesson.title, "Empty");
    }

    #[test]
    fn test_entities_decoded_in_text() {
        let parser = ContentParser::default();
        let lesson =
            parser.convert_to_lesson(&section("Ops", "<p>a &lt; b &amp;&amp; c</p>", &[]), 0);

        assert_eq!(lesson.content, "a < b && c");
    }
}
