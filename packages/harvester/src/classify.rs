//! Heading classification.
//!
//! Turns a raw table-of-contents entry into a `(key, display)` pair. Entries
//! that start with a section marker (`§`, `§§`, `Art.`, `Artikel`) followed by
//! a number are keyed by that number and its optional letter suffix; anything
//! else (tables of contents, introductory notes, appendices) is keyed by its
//! own text.

use regex::Regex;
use std::sync::LazyLock;

/// Section marker, optional punctuation, number, optional single-letter suffix.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SECTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:§+|Artikel|Art)?[.,:]?\s*(\d+(?:\w\b)?)").expect("valid regex")
});

/// Classify a heading into `(key, display)`.
///
/// Never fails: headings without a section number are keyed by their
/// trimmed text.
///
/// # Examples
/// ```
/// use gesetze_harvester::classify::classify;
///
/// assert_eq!(
///     classify("§ 12a Begriffsbestimmungen"),
///     ("12a".to_string(), "§ 12a Begriffsbestimmungen".to_string())
/// );
/// assert_eq!(
///     classify("Inhaltsübersicht"),
///     ("Inhaltsübersicht".to_string(), "Inhaltsübersicht".to_string())
/// );
/// ```
pub fn classify(heading: &str) -> (String, String) {
    let text = heading.trim();

    match SECTION_PATTERN.captures(text) {
        Some(caps) => {
            let key = caps
                .get(1)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            (key, collapse_section_spacing(text))
        }
        None => (text.to_string(), text.to_string()),
    }
}

/// Collapse a doubled space after a section sign (`"§  1"` becomes `"§ 1"`).
pub fn collapse_section_spacing(text: &str) -> String {
    text.replace("§  ", "§ ")
}
