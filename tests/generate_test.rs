//! End-to-end generator tests: docs tree and overlay in, JSON file out.

use std::fs;
use std::path::PathBuf;

use lessonkit::{
    ContentParser, GenerateConfig, ValidationType, check_output, generate, render_json,
    write_output,
};
use serde_json::Value;

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn docs_dir() -> PathBuf {
    PathBuf::from(FIXTURES_DIR).join("docs")
}

fn fixture_config(output: PathBuf) -> GenerateConfig {
    GenerateConfig {
        docs_dir: docs_dir(),
        output,
        overlay: Some(PathBuf::from(FIXTURES_DIR).join("overlay.json")),
        ..Default::default()
    }
}

#[test]
fn test_chapters_in_discovery_order() {
    let content = ContentParser::default().parse_all_html_files(&docs_dir());

    let chapters: Vec<_> = content
        .chapters
        .iter()
        .map(|c| (c.id.as_str(), c.order))
        .collect();
    assert_eq!(
        chapters,
        [
            ("01-basics", 0),
            ("01-suspend", 1),
            ("02-launch", 2),
            ("03-latin1", 3)
        ]
    );
    assert_eq!(content.lesson_count(), 12);
}

#[test]
fn test_missing_docs_dir_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let content = ContentParser::default().parse_all_html_files(&dir.path().join("docs"));
    assert!(content.chapters.is_empty());
}

#[test]
fn test_overlay_patches_lessons() {
    let dir = tempfile::tempdir().unwrap();
    let content = generate(&fixture_config(dir.path().join("lessons.json"))).unwrap();

    let suspend = &content.chapters[1].lessons[0];
    assert_eq!(
        suspend.initial_code.as_deref(),
        Some("// Write fetchUser using delay(1000)\n\n")
    );
    assert_eq!(
        suspend.hint.as_deref(),
        Some("Put the suspend keyword before fun and call delay().")
    );
    let rule = suspend.validation.as_ref().unwrap();
    assert_eq!(rule.kind, ValidationType::Contains);
    assert_eq!(rule.pattern, "suspend fun fetchUser");

    let launch = &content.chapters[2].lessons[1];
    assert_eq!(
        launch.checkpoint_message.as_deref(),
        Some("You started your first coroutine.")
    );
    assert_eq!(
        launch.initial_code.as_deref(),
        Some("// Write your code here\n")
    );

    // Untouched lessons keep their parsed shape
    let summary = content.chapters[0].lessons.last().unwrap();
    assert!(summary.hint.is_none());
    assert!(summary.validation.is_none());
}

#[test]
fn test_written_json_shape() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("lib/content/lessons.json");
    let config = fixture_config(output.clone());

    let json = render_json(&generate(&config).unwrap()).unwrap();
    write_output(&output, &json).unwrap();

    let value: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let chapters = value["chapters"].as_array().unwrap();
    assert_eq!(chapters.len(), 4);

    for chapter in chapters {
        assert!(!chapter["id"].as_str().unwrap().is_empty());
        assert!(!chapter["title"].as_str().unwrap().is_empty());
        assert!(chapter["description"].is_string());
        assert!(chapter["order"].is_u64());

        for lesson in chapter["lessons"].as_array().unwrap() {
            assert!(!lesson["id"].as_str().unwrap().is_empty());
            assert!(lesson["title"].is_string());
            assert!(lesson["content"].is_string());
            assert!(lesson["order"].is_u64());
        }
    }

    let functions = &chapters[0]["lessons"][3];
    assert_eq!(functions["id"], "functions-3");
    assert_eq!(
        functions["codeExample"],
        "fun greet(name: String) = \"Hello, $name\""
    );
    assert_eq!(functions["initialCode"], "// Write your code here\n");
    assert!(functions.get("hint").is_none());
    assert!(functions.get("validation").is_none());

    let suspend = &chapters[1]["lessons"][0];
    assert_eq!(suspend["validation"]["type"], "contains");
    assert_eq!(
        suspend["validation"]["message"],
        "Correct! You wrote a suspend function."
    );
}

#[test]
fn test_regeneration_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture_config(dir.path().join("lessons.json"));

    let first = render_json(&generate(&config).unwrap()).unwrap();
    let second = render_json(&generate(&config).unwrap()).unwrap();
    assert_eq!(first, second);
    assert!(first.ends_with("}\n"));
}

#[test]
fn test_check_detects_stale_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture_config(dir.path().join("lessons.json"));
    let json = render_json(&generate(&config).unwrap()).unwrap();

    assert!(!check_output(&config.output, &json).unwrap());

    write_output(&config.output, &json).unwrap();
    assert!(check_output(&config.output, &json).unwrap());

    fs::write(&config.output, json.replace("Kotlin Basics", "Kotlin")).unwrap();
    assert!(!check_output(&config.output, &json).unwrap());
}
