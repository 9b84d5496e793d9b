//! Multi-criterion filtering over a book collection.
//!
//! Dimensions combine as AND; set-valued dimensions (statuses, genres,
//! series) are OR within themselves. Input order is preserved and the input
//! slice is never mutated.

use crate::models::{Book, BookFilters};

/// Apply `filters` to `books`, returning owned clones of the matching
/// records in their original order.
pub fn filter_books(books: &[Book], filters: &BookFilters) -> Vec<Book> {
    let matched: Vec<Book> = books
        .iter()
        .filter(|book| matches(book, filters))
        .cloned()
        .collect();
    tracing::debug!(
        total = books.len(),
        matched = matched.len(),
        "applied book filters"
    );
    matched
}

fn matches(book: &Book, filters: &BookFilters) -> bool {
    if let Some(needle) = filters.search.as_deref()
        && !needle.is_empty()
        && !matches_search(book, needle)
    {
        return false;
    }

    if !filters.statuses.is_empty() && !filters.statuses.contains(&book.reading_status()) {
        return false;
    }

    if !filters.genre_ids.is_empty()
        && !filters.genre_ids.iter().any(|id| has_genre(book, id))
    {
        return false;
    }

    if !filters.series_ids.is_empty()
        && !filters.series_ids.iter().any(|id| in_series(book, id))
    {
        return false;
    }

    if let Some(floor) = filters.min_rating
        && !rating_at_least(book, floor)
    {
        return false;
    }

    if let Some(author) = filters.author.as_deref()
        && !author_matches(book, author)
    {
        return false;
    }

    true
}

/// Case-insensitive substring match against title or author.
pub(crate) fn matches_search(book: &Book, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    book.title.to_lowercase().contains(&needle) || book.author.to_lowercase().contains(&needle)
}

pub(crate) fn has_genre(book: &Book, genre_id: &str) -> bool {
    book.genres.iter().any(|id| id == genre_id)
}

pub(crate) fn in_series(book: &Book, series_id: &str) -> bool {
    book.series_id.as_deref() == Some(series_id)
}

/// An unrated book never matches a rating floor.
pub(crate) fn rating_at_least(book: &Book, floor: u8) -> bool {
    book.rating.is_some_and(|r| r >= floor)
}

/// Exact case-insensitive equality, not substring.
pub(crate) fn author_matches(book: &Book, author: &str) -> bool {
    book.author.to_lowercase() == author.to_lowercase()
}
