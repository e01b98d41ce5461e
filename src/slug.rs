//! Slug generation for chapter and lesson ids.

/// Hangul syllables block, kept verbatim in slugs alongside ASCII.
const HANGUL_SYLLABLES: std::ops::RangeInclusive<char> = '\u{AC00}'..='\u{D7A3}';

fn is_slug_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || HANGUL_SYLLABLES.contains(&c)
}

/// Generate a slug from free text.
///
/// Lowercases the text, collapses every run of characters outside
/// `a-z`, `0-9` and Hangul syllables into a single hyphen, and trims
/// hyphens from both ends.
///
/// # Examples
///
/// ```
/// use lessonkit::slugify;
///
/// assert_eq!(slugify("Getting Started"), "getting-started");
/// assert_eq!(slugify("  Coroutines: launch & async!  "), "coroutines-launch-async");
/// assert_eq!(slugify("코루틴 기초"), "코루틴-기초");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if is_slug_char(c) {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Lesson id: the heading's slug suffixed with its position in the chapter.
///
/// Ids are unique within a chapter but not across chapters.
pub fn lesson_id(heading: &str, order: usize) -> String {
    format!("{}-{order}", slugify(heading))
}
