//! Hand-authored lesson patches.
//!
//! Starter code, hints and answer checks cannot be scraped from the docs,
//! so they live in a separate overlay file that is applied to freshly
//! parsed content:
//!
//! ```json
//! {
//!   "lessons": [
//!     {
//!       "chapter": "coroutines",
//!       "order": 1,
//!       "initialCode": "// Write fetchUser using delay(1000)\n",
//!       "hint": "Mark the function with suspend.",
//!       "validation": {
//!         "type": "contains",
//!         "pattern": "suspend fun fetchUser",
//!         "message": "Correct!"
//!       }
//!     }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Lesson, ParsedContent, ValidationRule};

/// A set of lesson patches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonOverlay {
    #[serde(default)]
    pub lessons: Vec<LessonPatch>,
}

/// Fields to set on one lesson, addressed by chapter id and lesson order.
///
/// Only fields present in the patch are written; everything else keeps the
/// parsed value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LessonPatch {
    pub chapter: String,
    pub order: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continue_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkpoint_message: Option<String>,
}

impl LessonPatch {
    fn apply_to(&self, lesson: &mut Lesson) {
        fn set<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
            if let Some(value) = value {
                *target = Some(value.clone());
            }
        }

        set(&mut lesson.initial_code, &self.initial_code);
        set(&mut lesson.hint, &self.hint);
        set(&mut lesson.validation, &self.validation);
        set(&mut lesson.arc, &self.arc);
        set(&mut lesson.story, &self.story);
        set(&mut lesson.continue_from, &self.continue_from);
        set(&mut lesson.checkpoint_message, &self.checkpoint_message);
    }
}

impl LessonOverlay {
    /// Load an overlay from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| Error::InvalidOverlay {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Apply every patch to `content`, returning how many patches did not
    /// match a lesson. Unmatched patches are logged and otherwise ignored.
    pub fn apply(&self, content: &mut ParsedContent) -> usize {
        let mut unmatched = 0;

        for patch in &self.lessons {
            let lesson = content
                .chapter_mut(&patch.chapter)
                .and_then(|chapter| chapter.lessons.iter_mut().find(|l| l.order == patch.order));

            match lesson {
                Some(lesson) => patch.apply_to(lesson),
                None => {
                    unmatched += 1;
                    tracing::warn!(
                        chapter = %patch.chapter,
                        order = patch.order,
                        "Overlay patch matches no lesson"
                    );
                }
            }
        }

        tracing::debug!(
            patches = self.lessons.len(),
            unmatched,
            "Applied lesson overlay"
        );
        unmatched
    }
}
