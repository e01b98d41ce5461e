//! Small helpers shared by the parser and generator.

use std::borrow::Cow;
use std::path::Path;

/// Decode course page bytes as UTF-8.
///
/// A leading byte order mark is dropped and malformed sequences become
/// U+FFFD. The flag is `true` when any replacement was made.
pub fn decode_utf8(bytes: &[u8]) -> (Cow<'_, str>, bool) {
    encoding_rs::UTF_8.decode_with_bom_removal(bytes)
}

/// File name with a trailing `.html` removed (other extensions are kept).
pub fn page_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.strip_suffix(".html") {
        Some(stem) => stem.to_string(),
        None => name,
    }
}
