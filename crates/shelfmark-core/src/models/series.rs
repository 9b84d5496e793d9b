use serde::{Deserialize, Serialize};

use crate::normalize::slugify;

/// A book series. Books reference a series by id and carry their own
/// position within it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    pub id: String,
    pub name: String,
}

impl Series {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: slugify(&name),
            name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_new() {
        let series = Series::new("The Expanse");
        assert_eq!(series.id, "the-expanse");
        assert_eq!(series.name, "The Expanse");
    }

    #[test]
    fn test_series_json_roundtrip() {
        let series = Series::new("Hainish Cycle");
        let json = serde_json::to_string(&series).unwrap();
        let restored: Series = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id, "hainish-cycle");
        assert_eq!(restored.name, series.name);
    }
}
