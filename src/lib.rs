//! # lessonkit
//!
//! Offline content pipeline for an interactive programming course site.
//!
//! Course pages are structured HTML files: a chapter per file, a lesson per
//! `h1`–`h3` heading, code samples in `<pre><code class="language-*">`
//! blocks. `lessonkit` scrapes a docs tree of such pages into one JSON
//! document that the site imports at build time.
//!
//! ## Quick Start
//!
//! ```no_run
//! use lessonkit::{GenerateConfig, generate, render_json, write_output};
//!
//! let config = GenerateConfig::default(); // docs/ -> lib/content/lessons.json
//! let content = generate(&config).unwrap();
//! let json = render_json(&content).unwrap();
//! write_output(&config.output, &json).unwrap();
//! ```
//!
//! ## Parsing single pages
//!
//! ```
//! use lessonkit::ContentParser;
//!
//! let parser = ContentParser::default();
//! let sections = parser.extract_sections("<h2>One</h2><h2>Two</h2><p>x</p>");
//! assert_eq!(sections.len(), 2);
//! assert_eq!(sections[0].content, "");
//! ```

pub mod discover;
pub mod dom;
pub mod error;
pub mod generate;
pub mod model;
pub mod overlay;
pub mod parser;
pub mod slug;
pub(crate) mod util;

pub use error::{Error, Result};
pub use generate::{GenerateConfig, check_output, generate, render_json, write_output};
pub use model::{Chapter, CodeBlock, Lesson, ParsedContent, Section, ValidationRule, ValidationType};
pub use overlay::{LessonOverlay, LessonPatch};
pub use parser::{ContentParser, ParserConfig};
pub use slug::slugify;
