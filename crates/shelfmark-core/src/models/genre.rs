use serde::{Deserialize, Serialize};

use crate::error::{Result, ShelfmarkError};
use crate::normalize::slugify;

/// A user-defined genre. Books reference genres by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: String,
    pub name: String,

    /// Display color, six hex digits without the leading `#`.
    pub color: String,
}

impl Genre {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let color = color.into();
        if color.len() != 6 || !color.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ShelfmarkError::InvalidColor(color));
        }
        Ok(Self {
            id: slugify(&name),
            name,
            color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_new() {
        let genre = Genre::new("Science Fiction", "4a90d9").unwrap();
        assert_eq!(genre.id, "science-fiction");
        assert_eq!(genre.name, "Science Fiction");
        assert_eq!(genre.color, "4a90d9");
    }

    #[test]
    fn test_genre_rejects_bad_color() {
        assert!(Genre::new("Horror", "#ff0000").is_err());
        assert!(Genre::new("Horror", "ff00").is_err());
        assert!(Genre::new("Horror", "gg0000").is_err());
    }

    #[test]
    fn test_genre_json_roundtrip() {
        let genre = Genre::new("Fantasy", "2ecc71").unwrap();
        let json = serde_json::to_string(&genre).unwrap();
        let restored: Genre = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id, genre.id);
        assert_eq!(restored.color, genre.color);
    }
}
