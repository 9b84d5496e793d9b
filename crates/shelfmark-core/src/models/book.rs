use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ShelfmarkError;

/// A timestamp as it actually appears in imported snapshots: a plain
/// millisecond number, a store-native `{seconds, nanoseconds}` object, or a
/// date string. `to_millis` is the single normalization point; comparators
/// never look at the raw representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(i64),
    Composite { seconds: i64, nanoseconds: u32 },
    Text(String),
}

impl Timestamp {
    pub fn now() -> Self {
        Self::Millis(Utc::now().timestamp_millis())
    }

    /// Milliseconds since the Unix epoch. Text accepts RFC 3339 or
    /// `YYYY-MM-DD` (midnight UTC); unparseable text degrades to 0 and
    /// out-of-range composite values saturate, so one bad record cannot
    /// fault a whole sort.
    pub fn to_millis(&self) -> i64 {
        match self {
            Self::Millis(ms) => *ms,
            Self::Composite {
                seconds,
                nanoseconds,
            } => seconds
                .saturating_mul(1000)
                .saturating_add(i64::from(*nanoseconds) / 1_000_000),
            Self::Text(s) => {
                if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                    return dt.timestamp_millis();
                }
                if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                    return d.and_time(NaiveTime::MIN).and_utc().timestamp_millis();
                }
                tracing::warn!(text = %s, "unparseable timestamp text, treating as epoch");
                0
            }
        }
    }
}

/// One attempt at reading a book. Re-reads append new sessions; the last
/// element of `Book::reads` is authoritative for current status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadingSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<Timestamp>,
}

impl ReadingSession {
    pub fn started(at: Timestamp) -> Self {
        Self {
            started_at: Some(at),
            finished_at: None,
        }
    }

    pub fn finished(started_at: Option<Timestamp>, at: Timestamp) -> Self {
        Self {
            started_at,
            finished_at: Some(at),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadingStatus {
    #[default]
    WantToRead,
    Reading,
    Finished,
}

impl std::fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WantToRead => write!(f, "want-to-read"),
            Self::Reading => write!(f, "reading"),
            Self::Finished => write!(f, "finished"),
        }
    }
}

impl std::str::FromStr for ReadingStatus {
    type Err = ShelfmarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "want-to-read" | "want_to_read" => Ok(Self::WantToRead),
            "reading" => Ok(Self::Reading),
            "finished" => Ok(Self::Finished),
            _ => Err(ShelfmarkError::UnknownStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,

    /// 1 to 5, or absent when the book has not been rated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,

    /// Genre ids, not names.
    #[serde(default)]
    pub genres: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_id: Option<String>,

    /// Ordinal within the series; fractional entries (novella 2.5) are legal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_position: Option<f32>,

    /// Insertion order, not chronologically sorted.
    #[serde(default)]
    pub reads: Vec<ReadingSession>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,

    /// Presence marks a soft-deleted book.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            author: author.into(),
            isbn: None,
            publisher: None,
            published_date: None,
            physical_format: None,
            page_count: None,
            cover_image_url: None,
            rating: None,
            genres: Vec::new(),
            series_id: None,
            series_position: None,
            reads: Vec::new(),
            notes: None,
            created_at: Some(now.clone()),
            updated_at: Some(now),
            deleted_at: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Current status, derived from the LAST reading session only. Editing
    /// an earlier session never changes the answer; "start a re-read" is
    /// appending a session, not rewriting history.
    pub fn reading_status(&self) -> ReadingStatus {
        match self.reads.last() {
            None => ReadingStatus::WantToRead,
            Some(last) => {
                if last.finished_at.is_some() {
                    ReadingStatus::Finished
                } else if last.started_at.is_some() {
                    ReadingStatus::Reading
                } else {
                    ReadingStatus::WantToRead
                }
            }
        }
    }
}
