use serde::{Deserialize, Serialize};

use super::ReadingStatus;

/// A filter query as selected in a browse UI. Every dimension is optional;
/// an absent or empty field means "no constraint on that dimension".
///
/// Set-valued dimensions are OR within the set and AND across dimensions:
/// `statuses: [reading, finished], genre_ids: [g1]` reads "(reading OR
/// finished) AND tagged g1".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookFilters {
    /// Case-insensitive substring match against title or author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub statuses: Vec<ReadingStatus>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genre_ids: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub series_ids: Vec<String>,

    /// Rating floor, 1 to 5. Unrated books never match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<u8>,

    /// Exact case-insensitive author match, not a substring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl BookFilters {
    /// True when no dimension constrains anything; filtering with an empty
    /// query returns the whole collection.
    pub fn is_empty(&self) -> bool {
        self.search.as_deref().map_or(true, str::is_empty)
            && self.statuses.is_empty()
            && self.genre_ids.is_empty()
            && self.series_ids.is_empty()
            && self.min_rating.is_none()
            && self.author.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(BookFilters::default().is_empty());
    }

    #[test]
    fn test_blank_search_is_empty() {
        let filters = BookFilters {
            search: Some(String::new()),
            ..Default::default()
        };
        assert!(filters.is_empty());
    }

    #[test]
    fn test_any_dimension_makes_nonempty() {
        let filters = BookFilters {
            min_rating: Some(3),
            ..Default::default()
        };
        assert!(!filters.is_empty());

        let filters = BookFilters {
            statuses: vec![ReadingStatus::Reading],
            ..Default::default()
        };
        assert!(!filters.is_empty());
    }

    #[test]
    fn test_filters_json_roundtrip() {
        let filters = BookFilters {
            search: Some("dune".to_string()),
            statuses: vec![ReadingStatus::Finished],
            genre_ids: vec!["science-fiction".to_string()],
            min_rating: Some(4),
            ..Default::default()
        };
        let json = serde_json::to_string(&filters).unwrap();
        let restored: BookFilters = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.search.as_deref(), Some("dune"));
        assert_eq!(restored.statuses, vec![ReadingStatus::Finished]);
        assert_eq!(restored.min_rating, Some(4));
    }
}
