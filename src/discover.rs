//! Course page discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Every non-directory entry named `*.html` under `dir`, depth-first.
///
/// Entries are visited in file-name order at each level, so the result is
/// stable across runs and platforms. Symlinks are listed without being
/// followed; reading them is left to the parser. A missing directory yields
/// nothing; unreadable entries are logged and skipped.
pub fn find_html_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "Docs directory not found");
        return Vec::new();
    }

    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable docs entry");
                None
            }
        })
        .filter(|entry| !entry.file_type().is_dir())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".html"))
        .map(|entry| entry.into_path())
        .collect()
}
