//! Text canonicalization for comparison.
//!
//! Titles, author names, series names, and genre names arrive from catalog
//! sources with inconsistent casing, diacritics, punctuation, and spacing.
//! Everything that compares free text (duplicate detection, caseless sort
//! keys, catalog hygiene in the surrounding app) goes through these
//! functions so equality is tolerant of formatting differences.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Base normalization: NFKD decomposition with combining marks dropped
/// (`Café` compares equal to `Cafe`), lowercased, inner whitespace collapsed
/// to single spaces, trimmed. Punctuation is preserved.
pub fn normalize_text(s: &str) -> String {
    collapse_whitespace(&fold(s))
}

/// Author-name normalization: [`normalize_text`] plus removal of periods,
/// hyphens, and apostrophes. Initials (`J.R.R.` vs `JRR`) and
/// hyphenated or Irish-prefixed surnames (`O'Brien` vs `OBrien`) are
/// formatted inconsistently across catalog sources.
pub fn normalize_author(s: &str) -> String {
    let stripped: String = fold(s)
        .chars()
        .filter(|c| !matches!(c, '.' | '-' | '\'' | '\u{2019}'))
        .collect();
    collapse_whitespace(&stripped)
}

/// Series-name normalization: [`normalize_text`] plus removal of a leading
/// `"The "`, since catalog sources disagree on whether the article is part
/// of the series name.
pub fn normalize_series(s: &str) -> String {
    let normalized = normalize_text(s);
    match normalized.strip_prefix("the ") {
        Some(rest) => rest.to_string(),
        None => normalized,
    }
}

/// Strip ISBN formatting: keep only ASCII alphanumerics, uppercased so an
/// ISBN-10 `x` check digit compares equal to `X`.
pub fn clean_isbn(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_uppercase()
}

/// Derive a stable id from a display name (`"Science Fiction"` →
/// `"science-fiction"`).
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// NFKD + combining-mark removal + lowercase.
fn fold(s: &str) -> String {
    s.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_folding() {
        assert_eq!(normalize_text("The HOBBIT"), "the hobbit");
    }

    #[test]
    fn diacritics_dropped() {
        assert_eq!(normalize_text("Café Höhle"), "cafe hohle");
        assert_eq!(normalize_text("Gabriel García Márquez"), "gabriel garcia marquez");
    }

    #[test]
    fn whitespace_collapsed() {
        assert_eq!(normalize_text("  The   Left \t Hand  "), "the left hand");
    }

    #[test]
    fn punctuation_preserved_in_titles() {
        assert_eq!(normalize_text("Dune: Messiah"), "dune: messiah");
    }

    #[test]
    fn author_initials() {
        assert_eq!(normalize_author("J.R.R. Tolkien"), "jrr tolkien");
        assert_eq!(normalize_author("j.r.r. tolkien"), "jrr tolkien");
    }

    #[test]
    fn author_hyphenated_and_prefixed() {
        assert_eq!(normalize_author("Smith-Jones"), "smithjones");
        assert_eq!(normalize_author("O'Brien"), "obrien");
        // Curly apostrophe, as pasted from web sources.
        assert_eq!(normalize_author("O\u{2019}Brien"), "obrien");
    }

    #[test]
    fn series_leading_article() {
        assert_eq!(normalize_series("The Lord of the Rings"), "lord of the rings");
        assert_eq!(normalize_series("the expanse"), "expanse");
        // Only a LEADING article is stripped.
        assert_eq!(normalize_series("All The Wrong Questions"), "all the wrong questions");
    }

    #[test]
    fn series_without_article_unchanged() {
        assert_eq!(normalize_series("Discworld"), "discworld");
        // "Theran" starts with "the" but not "the ".
        assert_eq!(normalize_series("Theran Chronicles"), "theran chronicles");
    }

    #[test]
    fn isbn_formatting_stripped() {
        assert_eq!(clean_isbn("978-0-306-40615-7"), "9780306406157");
        assert_eq!(clean_isbn("0 306 40615 2"), "0306406152");
        assert_eq!(clean_isbn("007462542x"), "007462542X");
    }

    #[test]
    fn slugify_display_names() {
        assert_eq!(slugify("Science Fiction"), "science-fiction");
        assert_eq!(slugify("Horror"), "horror");
    }

    #[test]
    fn empty_input() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_author(""), "");
        assert_eq!(clean_isbn(""), "");
    }
}
