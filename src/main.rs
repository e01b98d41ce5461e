//! lessonkit - course content generator

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lessonkit::generate::{DEFAULT_DOCS_DIR, DEFAULT_OUTPUT};
use lessonkit::parser::{page_stem, read_page};
use lessonkit::{
    ContentParser, GenerateConfig, ParserConfig, check_output, generate, render_json,
    write_output,
};

#[derive(Parser)]
#[command(name = "lessonkit")]
#[command(version, about = "Generate course lesson data from HTML docs", long_about = None)]
#[command(after_help = "EXAMPLES:
    lessonkit generate                          Parse docs/ into lib/content/lessons.json
    lessonkit generate --overlay overlay.json   Also apply hand-written hints and checks
    lessonkit generate --check                  Fail if lessons.json is out of date
    lessonkit inspect docs/coroutines.html      Show how one page is split")]
struct Cli {
    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse every page under the docs directory and write the JSON file
    Generate {
        /// Directory of HTML course pages
        #[arg(long, value_name = "DIR", default_value = DEFAULT_DOCS_DIR)]
        docs: PathBuf,

        /// JSON file to write
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Lesson patches (starter code, hints, validation) to apply
        #[arg(long, value_name = "FILE")]
        overlay: Option<PathBuf>,

        /// Language for code blocks without a language-* class
        #[arg(long, value_name = "LANG")]
        default_language: Option<String>,

        /// Write nothing; exit non-zero if the output file is stale
        #[arg(long)]
        check: bool,
    },

    /// Parse a single page and print its sections and chapter JSON
    Inspect {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    let result = match cli.command {
        Command::Generate {
            docs,
            output,
            overlay,
            default_language,
            check,
        } => {
            let mut parser = ParserConfig::default();
            if let Some(language) = default_language {
                parser.default_language = language;
            }
            let config = GenerateConfig {
                docs_dir: docs,
                output,
                overlay,
                parser,
            };
            run_generate(&config, check)
        }
        Command::Inspect { file } => inspect(&file),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run_generate(config: &GenerateConfig, check: bool) -> lessonkit::Result<ExitCode> {
    tracing::info!(dir = %config.docs_dir.display(), "Parsing course pages");

    let content = generate(config)?;
    for chapter in &content.chapters {
        tracing::info!(
            chapter = %chapter.title,
            lessons = chapter.lessons.len(),
            "Chapter"
        );
    }

    let json = render_json(&content)?;

    if check {
        if check_output(&config.output, &json)? {
            tracing::info!(output = %config.output.display(), "Lesson content is up to date");
            return Ok(ExitCode::SUCCESS);
        }
        tracing::error!(
            output = %config.output.display(),
            "Lesson content is stale; rerun `lessonkit generate`"
        );
        return Ok(ExitCode::FAILURE);
    }

    write_output(&config.output, &json)?;
    tracing::info!(output = %config.output.display(), "Wrote lesson content");
    Ok(ExitCode::SUCCESS)
}

fn inspect(path: &Path) -> lessonkit::Result<ExitCode> {
    let parser = ContentParser::default();
    let html = read_page(path)?;

    println!("File: {}", path.display());
    for section in parser.extract_sections(&html) {
        println!(
            "{}h{} {:?} ({} code block{})",
            "  ".repeat(usize::from(section.level.saturating_sub(1))),
            section.level,
            section.heading,
            section.code_blocks.len(),
            if section.code_blocks.len() == 1 { "" } else { "s" },
        );
    }

    let chapter = parser.parse_html_document(&html, &page_stem(path));
    println!("{}", serde_json::to_string_pretty(&chapter)?);
    Ok(ExitCode::SUCCESS)
}
