//! Code block extraction.

use crate::dom::{parse_html, select};
use crate::model::CodeBlock;

use super::ContentParser;

/// Class-token prefix carrying a code block's language.
const LANGUAGE_PREFIX: &str = "language-";

/// Language named by the first `language-<word>` token in a class
/// attribute, where `<word>` is the leading run of ASCII alphanumerics and
/// underscores.
pub fn detect_language(class_attr: &str) -> Option<&str> {
    class_attr.split_whitespace().find_map(|token| {
        let rest = token.strip_prefix(LANGUAGE_PREFIX)?;
        let end = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        (end > 0).then(|| &rest[..end])
    })
}

impl ContentParser {
    /// Every non-empty code element in an HTML fragment, in document order.
    pub fn extract_code_blocks(&self, html: &str) -> Vec<CodeBlock> {
        let dom = parse_html(html);

        select(&dom, &self.code)
            .into_iter()
            .filter_map(|id| {
                let code = dom.text(id).trim().to_string();
                if code.is_empty() {
                    return None;
                }
                let language = dom
                    .get_attr(id, "class")
                    .and_then(detect_language)
                    .unwrap_or(self.config.default_language.as_str())
                    .to_string();
                Some(CodeBlock { language, code })
            })
            .collect()
    }
}
