//! Lesson data model.
//!
//! [`ParsedContent`], [`Chapter`], [`Lesson`] and [`ValidationRule`] are the
//! records written to `lessons.json`; they serialize with camelCase keys and
//! omit absent optional fields. [`Section`] and [`CodeBlock`] are
//! intermediate parser output and are never serialized.

use serde::{Deserialize, Serialize};

/// Root of the generated content file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedContent {
    pub chapters: Vec<Chapter>,
}

impl ParsedContent {
    /// Total number of lessons across all chapters.
    pub fn lesson_count(&self) -> usize {
        self.chapters.iter().map(|c| c.lessons.len()).sum()
    }

    /// Find a chapter by id.
    pub fn chapter_mut(&mut self, id: &str) -> Option<&mut Chapter> {
        self.chapters.iter_mut().find(|c| c.id == id)
    }
}

/// One source HTML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub title: String,
    pub description: String,
    pub lessons: Vec<Lesson>,
    /// Zero-based position in file discovery order.
    pub order: usize,
}

/// One heading-delimited section of a chapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,
    /// Plain text of the section with code blocks removed.
    pub content: String,
    /// Sub-track label inside a chapter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arc: Option<String>,
    /// Narrative framing shown before the lesson body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_example: Option<String>,
    /// Starter code placed in the editor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Id of the lesson whose code this lesson continues.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continue_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkpoint_message: Option<String>,
    /// Position inside the chapter, matching heading document order.
    pub order: usize,
}

/// How a learner's code is compared against [`ValidationRule::pattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationType {
    Contains,
    NotContains,
    Exact,
    Regex,
}

/// Hand-authored answer check attached to a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRule {
    #[serde(rename = "type")]
    pub kind: ValidationType,
    pub pattern: String,
    /// Feedback shown when the check passes.
    pub message: String,
}

/// Content between a heading and the next heading of equal or higher rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    /// 1 through 3.
    pub level: u8,
    /// Concatenated markup of the sibling elements in the section.
    pub content: String,
    pub code_blocks: Vec<CodeBlock>,
}

/// A preformatted code snippet found in a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub language: String,
    pub code: String,
}
