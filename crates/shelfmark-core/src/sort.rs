//! Ordering for browse views.
//!
//! String keys compare case- and diacritic-insensitively with a raw-string
//! tie-break so the result is deterministic. Rating and series position put
//! books missing the value after all books that have one, in BOTH
//! directions; a book without a rating is not "rating zero".

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::ShelfmarkError;
use crate::models::{Book, Timestamp};
use crate::normalize::normalize_text;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Title,
    Author,
    Rating,
    SeriesPosition,
    CreatedAt,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Title => write!(f, "title"),
            Self::Author => write!(f, "author"),
            Self::Rating => write!(f, "rating"),
            Self::SeriesPosition => write!(f, "series-position"),
            Self::CreatedAt => write!(f, "created-at"),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = ShelfmarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "author" => Ok(Self::Author),
            "rating" => Ok(Self::Rating),
            "series-position" | "series_position" => Ok(Self::SeriesPosition),
            "created-at" | "created_at" => Ok(Self::CreatedAt),
            _ => Err(ShelfmarkError::UnknownSortKey(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = ShelfmarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ShelfmarkError::UnknownSortDirection(s.to_string())),
        }
    }
}

/// Sort a defensive copy of `books`; the caller's slice is untouched.
pub fn sort_books(books: &[Book], key: SortKey, direction: SortDirection) -> Vec<Book> {
    let mut sorted = books.to_vec();
    sorted.sort_by(|a, b| compare(a, b, key, direction));
    tracing::debug!(count = sorted.len(), %key, %direction, "sorted collection");
    sorted
}

fn compare(a: &Book, b: &Book, key: SortKey, direction: SortDirection) -> Ordering {
    match key {
        SortKey::Title => direction.apply(caseless_cmp(&a.title, &b.title)),
        SortKey::Author => direction.apply(caseless_cmp(&a.author, &b.author)),
        SortKey::Rating => missing_last(a.rating, b.rating, direction, |x, y| x.cmp(&y)),
        SortKey::SeriesPosition => missing_last(
            a.series_position,
            b.series_position,
            direction,
            |x, y| x.total_cmp(&y),
        ),
        SortKey::CreatedAt => {
            direction.apply(created_millis(a).cmp(&created_millis(b)))
        }
    }
}

fn caseless_cmp(a: &str, b: &str) -> Ordering {
    normalize_text(a)
        .cmp(&normalize_text(b))
        .then_with(|| a.cmp(b))
}

/// Absent `created_at` compares as 0, the oldest possible record.
fn created_millis(book: &Book) -> i64 {
    book.created_at.as_ref().map_or(0, Timestamp::to_millis)
}

/// Missing values go last regardless of direction; only the relative order
/// of present values reverses under `Desc`.
fn missing_last<T: Copy>(
    a: Option<T>,
    b: Option<T>,
    direction: SortDirection,
    cmp: impl Fn(T, T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => direction.apply(cmp(x, y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_book(id: &str, title: &str, author: &str) -> Book {
        let mut book = Book::new(title, author);
        book.id = id.to_string();
        book
    }

    fn ids(books: &[Book]) -> Vec<&str> {
        books.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn title_sort_ignores_case_and_diacritics() {
        let books = vec![
            build_book("c", "cherry", "X"),
            build_book("a", "Árbol", "X"),
            build_book("b", "banana", "X"),
        ];
        let sorted = sort_books(&books, SortKey::Title, SortDirection::Asc);
        assert_eq!(ids(&sorted), vec!["a", "b", "c"]);
    }

    #[test]
    fn equal_normalized_titles_tie_break_on_raw_text() {
        let books = vec![
            build_book("lower", "apple", "X"),
            build_book("upper", "Apple", "X"),
        ];
        let sorted = sort_books(&books, SortKey::Title, SortDirection::Asc);
        // "Apple" < "apple" bytewise, and the order is stable across runs.
        assert_eq!(ids(&sorted), vec!["upper", "lower"]);
    }

    #[test]
    fn unrated_books_sort_last_in_both_directions() {
        let mut five = build_book("five", "A", "X");
        five.rating = Some(5);
        let mut three = build_book("three", "B", "X");
        three.rating = Some(3);
        let unrated = build_book("unrated", "C", "X");
        let books = vec![unrated.clone(), five.clone(), three.clone()];

        let asc = sort_books(&books, SortKey::Rating, SortDirection::Asc);
        assert_eq!(ids(&asc), vec!["three", "five", "unrated"]);

        let desc = sort_books(&books, SortKey::Rating, SortDirection::Desc);
        assert_eq!(ids(&desc), vec!["five", "three", "unrated"]);
    }

    #[test]
    fn series_position_handles_fractional_entries() {
        let mut one = build_book("one", "A", "X");
        one.series_position = Some(1.0);
        let mut novella = build_book("novella", "B", "X");
        novella.series_position = Some(2.5);
        let mut three = build_book("three", "C", "X");
        three.series_position = Some(3.0);
        let loose = build_book("loose", "D", "X");
        let books = vec![three, loose, novella, one];

        let asc = sort_books(&books, SortKey::SeriesPosition, SortDirection::Asc);
        assert_eq!(ids(&asc), vec!["one", "novella", "three", "loose"]);

        let desc = sort_books(&books, SortKey::SeriesPosition, SortDirection::Desc);
        assert_eq!(ids(&desc), vec!["three", "novella", "one", "loose"]);
    }

    #[test]
    fn created_at_missing_counts_as_oldest() {
        let mut newer = build_book("newer", "A", "X");
        newer.created_at = Some(Timestamp::Millis(2_000));
        let mut older = build_book("older", "B", "X");
        older.created_at = Some(Timestamp::Text("1970-01-01T00:00:01Z".to_string()));
        let mut dateless = build_book("dateless", "C", "X");
        dateless.created_at = None;
        let books = vec![newer, older, dateless];

        let asc = sort_books(&books, SortKey::CreatedAt, SortDirection::Asc);
        assert_eq!(ids(&asc), vec!["dateless", "older", "newer"]);

        let desc = sort_books(&books, SortKey::CreatedAt, SortDirection::Desc);
        assert_eq!(ids(&desc), vec!["newer", "older", "dateless"]);
    }

    #[test]
    fn sorting_is_deterministic() {
        let books = vec![
            build_book("b", "Same", "X"),
            build_book("a", "Same", "X"),
            build_book("c", "Other", "X"),
        ];
        let first = sort_books(&books, SortKey::Title, SortDirection::Asc);
        let second = sort_books(&books, SortKey::Title, SortDirection::Asc);
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn sort_key_parsing() {
        assert_eq!("title".parse::<SortKey>().unwrap(), SortKey::Title);
        assert_eq!(
            "series-position".parse::<SortKey>().unwrap(),
            SortKey::SeriesPosition
        );
        assert_eq!(
            "created_at".parse::<SortKey>().unwrap(),
            SortKey::CreatedAt
        );
        assert!("popularity".parse::<SortKey>().is_err());

        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert_eq!(
            "desc".parse::<SortDirection>().unwrap(),
            SortDirection::Desc
        );
        assert!("descending".parse::<SortDirection>().is_err());
    }

    #[test]
    fn sort_key_display_roundtrip() {
        for key in [
            SortKey::Title,
            SortKey::Author,
            SortKey::Rating,
            SortKey::SeriesPosition,
            SortKey::CreatedAt,
        ] {
            assert_eq!(key.to_string().parse::<SortKey>().unwrap(), key);
        }
    }
}
