use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dedup::DEFAULT_SCAN_LIMIT;
use crate::error::Result;
use crate::sort::{SortDirection, SortKey};

/// Root application configuration, loaded from `~/.config/shelfmark/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub library: LibraryConfig,
    pub query: QueryConfig,
    pub dedup: DedupConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// JSON snapshot of the collection, as exported by the tracking app.
    pub snapshot_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub default_sort: String,
    pub default_direction: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Title+author tier scan cap; the ISBN tier always scans everything.
    pub scan_limit: usize,
}

// ─── Defaults ──────────────────────────────────────────────

impl Default for LibraryConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("shelfmark");

        Self {
            snapshot_path: data_dir.join("library.json").to_string_lossy().to_string(),
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_sort: "title".to_string(),
            default_direction: "asc".to_string(),
        }
    }
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            scan_limit: DEFAULT_SCAN_LIMIT,
        }
    }
}

// ─── Load / Save ───────────────────────────────────────────

impl AppConfig {
    /// Standard config file path: `~/.config/shelfmark/config.toml`
    pub fn config_path() -> PathBuf {
        // Allow override via env var
        if let Ok(path) = std::env::var("SHELFMARK_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("shelfmark")
            .join("config.toml")
    }

    /// Load config from disk, falling back to defaults if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        Self::load_from(&path)
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save config to the standard path.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        self.save_to(&path)
    }

    /// Save config to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn snapshot_path(&self) -> PathBuf {
        PathBuf::from(&self.library.snapshot_path)
    }
}

impl QueryConfig {
    /// Parse the configured sort key; a typo in the config file fails
    /// loudly instead of silently falling back to some order.
    pub fn sort_key(&self) -> Result<SortKey> {
        self.default_sort.parse()
    }

    pub fn direction(&self) -> Result<SortDirection> {
        self.default_direction.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.dedup.scan_limit, 100);
        assert_eq!(cfg.query.default_sort, "title");
        assert!(!cfg.library.snapshot_path.is_empty());
        assert_eq!(cfg.query.sort_key().unwrap(), SortKey::Title);
        assert_eq!(cfg.query.direction().unwrap(), SortDirection::Asc);
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = AppConfig::default();
        cfg.dedup.scan_limit = 250;
        cfg.query.default_sort = "created-at".to_string();
        cfg.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.dedup.scan_limit, 250);
        assert_eq!(loaded.query.default_sort, "created-at");
        assert_eq!(loaded.library.snapshot_path, cfg.library.snapshot_path);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let cfg =
            AppConfig::load_from(Path::new("/tmp/nonexistent_shelfmark_config.toml")).unwrap();
        assert_eq!(cfg.dedup.scan_limit, 100);
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[dedup]\nscan_limit = 25\n").unwrap();

        let cfg = AppConfig::load_from(&path).unwrap();
        assert_eq!(cfg.dedup.scan_limit, 25);
        assert_eq!(cfg.query.default_sort, "title");
    }

    #[test]
    fn test_misspelled_sort_key_fails_loudly() {
        let cfg = AppConfig {
            query: QueryConfig {
                default_sort: "titel".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(cfg.query.sort_key().is_err());
    }
}
