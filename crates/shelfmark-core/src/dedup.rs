//! Duplicate detection for the add-book flow.
//!
//! Two tiers, first match wins. An ISBN match is an exact compare over the
//! whole collection after formatting is stripped from both sides. The
//! title+author tier compares normalized text but scans only the first
//! `scan_limit` records so the per-keystroke cost in an add form stays
//! constant; callers needing certainty over a larger collection pre-filter
//! before asking.
//!
//! The result is advisory. Blocking, warning, or letting the user override
//! is the caller's decision.

use serde::Serialize;

use crate::models::Book;
use crate::normalize::{clean_isbn, normalize_author, normalize_text};

/// Title+author tier scan cap, overridable per checker or via
/// `[dedup] scan_limit` in the config file.
pub const DEFAULT_SCAN_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchKind {
    Isbn,
    TitleAuthor,
}

/// The identifying fields of a book about to be added.
#[derive(Debug, Clone, Default)]
pub struct BookCandidate {
    pub isbn: Option<String>,
    pub title: String,
    pub author: String,
}

impl BookCandidate {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            isbn: None,
            title: title.into(),
            author: author.into(),
        }
    }

    pub fn with_isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }

    /// Normalized `title|author` pair. Callers use it to suppress a repeat
    /// warning until the identifying fields actually change, so "proceed
    /// anyway" sticks while the user keeps typing elsewhere in the form.
    pub fn fingerprint(&self) -> String {
        format!(
            "{}|{}",
            normalize_text(&self.title),
            normalize_author(&self.author)
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DuplicateCheck {
    pub is_duplicate: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_kind: Option<MatchKind>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_id: Option<String>,
}

impl DuplicateCheck {
    fn no_match() -> Self {
        Self {
            is_duplicate: false,
            match_kind: None,
            existing_id: None,
        }
    }

    fn hit(kind: MatchKind, existing_id: &str) -> Self {
        Self {
            is_duplicate: true,
            match_kind: Some(kind),
            existing_id: Some(existing_id.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DuplicateChecker {
    scan_limit: usize,
}

impl Default for DuplicateChecker {
    fn default() -> Self {
        Self {
            scan_limit: DEFAULT_SCAN_LIMIT,
        }
    }
}

impl DuplicateChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scan_limit(mut self, limit: usize) -> Self {
        self.scan_limit = limit;
        self
    }

    pub fn check(&self, candidate: &BookCandidate, existing: &[Book]) -> DuplicateCheck {
        if let Some(raw) = candidate.isbn.as_deref() {
            let cleaned = clean_isbn(raw);
            if !cleaned.is_empty() {
                for book in existing {
                    if book
                        .isbn
                        .as_deref()
                        .is_some_and(|isbn| clean_isbn(isbn) == cleaned)
                    {
                        tracing::debug!(existing_id = %book.id, "duplicate isbn");
                        return DuplicateCheck::hit(MatchKind::Isbn, &book.id);
                    }
                }
            }
        }

        let title = normalize_text(&candidate.title);
        let author = normalize_author(&candidate.author);
        // A blank field would vacuously match other blank records.
        if title.is_empty() || author.is_empty() {
            return DuplicateCheck::no_match();
        }

        for book in existing.iter().take(self.scan_limit) {
            if normalize_text(&book.title) == title && normalize_author(&book.author) == author {
                tracing::debug!(existing_id = %book.id, "duplicate title and author");
                return DuplicateCheck::hit(MatchKind::TitleAuthor, &book.id);
            }
        }

        DuplicateCheck::no_match()
    }
}
