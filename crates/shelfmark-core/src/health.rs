//! Collection health: per-book completeness scores and issue buckets.
//!
//! Six weighted metadata fields add up to a fixed total weight of 8; a
//! book's score is the present fraction of that weight as a 0..=100
//! percentage. ISBN is tracked as an issue but carries weight 0: it only
//! affects whether a book counts as fixable, since a missing ISBN is
//! exactly what blocks an automatic catalog re-lookup.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::Book;

const TOTAL_WEIGHT: u32 = 8;

/// A metadata gap on a single book. Serialized names key the `issues` map
/// in a [`HealthReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    Cover,
    Genres,
    PageCount,
    Format,
    Publisher,
    PublishedDate,
    Isbn,
}

impl IssueKind {
    pub const ALL: [IssueKind; 7] = [
        IssueKind::Cover,
        IssueKind::Genres,
        IssueKind::PageCount,
        IssueKind::Format,
        IssueKind::Publisher,
        IssueKind::PublishedDate,
        IssueKind::Isbn,
    ];

    /// The score-bearing kinds, everything except Isbn.
    pub const WEIGHTED: [IssueKind; 6] = [
        IssueKind::Cover,
        IssueKind::Genres,
        IssueKind::PageCount,
        IssueKind::Format,
        IssueKind::Publisher,
        IssueKind::PublishedDate,
    ];

    pub fn weight(self) -> u32 {
        match self {
            Self::Cover | Self::Genres => 2,
            Self::Isbn => 0,
            _ => 1,
        }
    }

    /// Human-readable field name for plain-text output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cover => "cover image",
            Self::Genres => "genres",
            Self::PageCount => "page count",
            Self::Format => "format",
            Self::Publisher => "publisher",
            Self::PublishedDate => "published date",
            Self::Isbn => "isbn",
        }
    }

    /// True when the field this issue tracks is missing from `book`.
    fn applies(self, book: &Book) -> bool {
        match self {
            Self::Cover => !present_text(&book.cover_image_url),
            Self::Genres => book.genres.is_empty(),
            Self::PageCount => !book.page_count.is_some_and(|n| n > 0),
            Self::Format => !present_text(&book.physical_format),
            Self::Publisher => !present_text(&book.publisher),
            Self::PublishedDate => !present_text(&book.published_date),
            Self::Isbn => !present_text(&book.isbn),
        }
    }
}

/// Non-empty means present; a whitespace-only string still counts.
fn present_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

/// Percentage of present metadata weight, rounded half away from zero
/// (one field of weight 1 out of 8 scores 13, not 12).
pub fn completeness_score(book: &Book) -> u8 {
    let missing: u32 = IssueKind::WEIGHTED
        .iter()
        .filter(|kind| kind.applies(book))
        .map(|kind| kind.weight())
        .sum();
    let present = TOTAL_WEIGHT - missing;
    (100.0 * f64::from(present) / f64::from(TOTAL_WEIGHT)).round() as u8
}

/// Rounded mean of per-book scores. An empty collection is vacuously 100.
/// If the mean rounds up to 100 while any single book is below 100, the
/// result is clamped to 99: the library is never "perfect" unless every
/// book is.
pub fn aggregate_score(books: &[Book]) -> u8 {
    if books.is_empty() {
        return 100;
    }

    let scores: Vec<u8> = books.iter().map(completeness_score).collect();
    let sum: u32 = scores.iter().map(|s| u32::from(*s)).sum();
    let rounded = (f64::from(sum) / scores.len() as f64).round() as u8;

    if rounded == 100 && scores.iter().any(|s| *s < 100) {
        99
    } else {
        rounded
    }
}

/// Summary classification of a completeness score for one-glance UIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HealthBand {
    Excellent,
    Good,
    Fair,
    NeedsAttention,
}

impl HealthBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => Self::Excellent,
            70..=89 => Self::Good,
            50..=69 => Self::Fair,
            _ => Self::NeedsAttention,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsAttention => "Needs attention",
        }
    }
}

/// Collection-wide health snapshot, recomputed on demand.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub total_books: usize,
    pub completeness_score: u8,
    /// Sum of the weighted issue buckets; ISBN gaps are excluded,
    /// consistent with their zero weight.
    pub total_issues: usize,
    /// Books that have an ISBN but are missing at least one weighted
    /// field, so a catalog re-lookup could repair them.
    pub fixable_books: usize,
    /// Affected book ids per issue kind. Every kind appears, empty or not,
    /// so remediation UIs get a stable shape.
    pub issues: BTreeMap<IssueKind, Vec<String>>,
}

pub fn analyze_collection(books: &[Book]) -> HealthReport {
    let issues: BTreeMap<IssueKind, Vec<String>> = IssueKind::ALL
        .into_iter()
        .map(|kind| {
            let ids: Vec<String> = books
                .iter()
                .filter(|book| kind.applies(book))
                .map(|book| book.id.clone())
                .collect();
            (kind, ids)
        })
        .collect();

    let fixable_books = books
        .iter()
        .filter(|book| {
            !IssueKind::Isbn.applies(book)
                && IssueKind::WEIGHTED.iter().any(|kind| kind.applies(book))
        })
        .count();

    let total_issues = IssueKind::WEIGHTED
        .iter()
        .map(|kind| issues[kind].len())
        .sum();

    let report = HealthReport {
        total_books: books.len(),
        completeness_score: aggregate_score(books),
        total_issues,
        fixable_books,
        issues,
    };
    tracing::debug!(
        total_books = report.total_books,
        score = report.completeness_score,
        "analyzed collection health"
    );
    report
}
