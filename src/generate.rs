//! Content generation: docs tree in, `lessons.json` out.
//!
//! [`generate`] is the pure pipeline; [`write_output`] and [`check_output`]
//! are the thin filesystem boundary around it.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::ParsedContent;
use crate::overlay::LessonOverlay;
use crate::parser::{ContentParser, ParserConfig};

/// Directory scanned when none is given.
pub const DEFAULT_DOCS_DIR: &str = "docs";

/// Where the site imports lesson data from.
pub const DEFAULT_OUTPUT: &str = "lib/content/lessons.json";

/// Inputs of one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    pub docs_dir: PathBuf,
    pub output: PathBuf,
    /// Lesson patches applied after parsing.
    pub overlay: Option<PathBuf>,
    pub parser: ParserConfig,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from(DEFAULT_DOCS_DIR),
            output: PathBuf::from(DEFAULT_OUTPUT),
            overlay: None,
            parser: ParserConfig::default(),
        }
    }
}

/// Parse the docs tree and apply the overlay, if any.
pub fn generate(config: &GenerateConfig) -> Result<ParsedContent> {
    let parser = ContentParser::new(config.parser.clone())?;
    let mut content = parser.parse_all_html_files(&config.docs_dir);

    if let Some(path) = &config.overlay {
        let overlay = LessonOverlay::load(path)?;
        overlay.apply(&mut content);
    }

    tracing::info!(
        dir = %config.docs_dir.display(),
        chapters = content.chapters.len(),
        lessons = content.lesson_count(),
        "Generated lesson content"
    );
    Ok(content)
}

/// Pretty-printed JSON with a trailing newline.
///
/// Output depends only on `content`, so regenerating unchanged docs gives
/// byte-identical files.
pub fn render_json(content: &ParsedContent) -> Result<String> {
    let mut json = serde_json::to_string_pretty(content)?;
    json.push('\n');
    Ok(json)
}

/// Write rendered JSON, creating parent directories as needed.
pub fn write_output(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    Ok(())
}

/// Whether `path` already holds exactly `json`. A missing file is stale.
pub fn check_output(path: &Path, json: &str) -> Result<bool> {
    match fs::read_to_string(path) {
        Ok(existing) => Ok(existing == json),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_render_json_two_space_indent() {
        let json = render_json(&ParsedContent::default()).unwrap();
        assert_eq!(json, "{\n  \"chapters\": []\n}\n");
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lib/content/lessons.json");

        write_output(&path, "{}\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
    }

    #[test]
    fn test_write_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("lib");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write_output(&blocker.join("lessons.json"), "{}").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_check_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lessons.json");

        assert!(!check_output(&path, "a").unwrap());
        fs::write(&path, "a").unwrap();
        assert!(check_output(&path, "a").unwrap());
        assert!(!check_output(&path, "b").unwrap());
    }

    #[test]
    fn test_generate_bad_overlay_fails() {
        let dir = tempfile::tempdir().unwrap();
        let overlay = dir.path().join("overlay.json");
        fs::write(&overlay, "not json").unwrap();

        let config = GenerateConfig {
            docs_dir: dir.path().join("docs"),
            overlay: Some(overlay),
            ..Default::default()
        };
        assert!(matches!(generate(&config), Err(Error::InvalidOverlay { .. })));
    }
}
