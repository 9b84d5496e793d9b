//! Per-dimension option counts for faceted browsing.
//!
//! A browse UI shows "(N)" next to every filter option and disables the
//! empty ones. The counter is population-agnostic: pass the full collection
//! for global counts, or the currently filtered view so selecting one value
//! narrows the counts on the remaining dimensions.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::filter::{author_matches, has_genre, in_series, rating_at_least};
use crate::models::{Book, Genre, ReadingStatus, Series};

/// Option counts over one population. BTreeMaps keep iteration and JSON
/// output deterministic. Every catalog entry appears, zero counts included,
/// so already-selected options can still be rendered when they empty out.
#[derive(Debug, Clone, Serialize)]
pub struct FacetCounts {
    pub total: usize,
    pub reading: usize,
    pub finished: usize,
    pub genres: BTreeMap<String, usize>,
    pub series: BTreeMap<String, usize>,
    /// Keyed by rating floor 1..=5; `ratings[r]` counts books rated >= r,
    /// cumulative rather than exact.
    pub ratings: BTreeMap<u8, usize>,
    pub authors: BTreeMap<String, usize>,
}

/// Tally `books` against the caller-supplied catalogs. The genre/series/
/// author catalogs drive which options are enumerated; the engine never
/// invents or drops entries.
pub fn facet_counts(
    books: &[Book],
    genres: &[Genre],
    series: &[Series],
    authors: &[String],
) -> FacetCounts {
    let statuses: Vec<ReadingStatus> = books.iter().map(Book::reading_status).collect();

    let counts = FacetCounts {
        total: books.len(),
        reading: statuses
            .iter()
            .filter(|s| **s == ReadingStatus::Reading)
            .count(),
        finished: statuses
            .iter()
            .filter(|s| **s == ReadingStatus::Finished)
            .count(),
        genres: genres
            .iter()
            .map(|genre| {
                let n = books.iter().filter(|b| has_genre(b, &genre.id)).count();
                (genre.id.clone(), n)
            })
            .collect(),
        series: series
            .iter()
            .map(|entry| {
                let n = books.iter().filter(|b| in_series(b, &entry.id)).count();
                (entry.id.clone(), n)
            })
            .collect(),
        ratings: (1..=5)
            .map(|floor| {
                let n = books.iter().filter(|b| rating_at_least(b, floor)).count();
                (floor, n)
            })
            .collect(),
        authors: authors
            .iter()
            .map(|author| {
                let n = books.iter().filter(|b| author_matches(b, author)).count();
                (author.clone(), n)
            })
            .collect(),
    };

    tracing::debug!(total = counts.total, "computed facet counts");
    counts
}
