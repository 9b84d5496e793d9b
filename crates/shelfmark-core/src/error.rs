use thiserror::Error;

/// All errors that can occur in shelfmark-core.
///
/// The engine itself degrades gracefully on malformed records (missing
/// fields are "absent", not faults); these variants cover caller-contract
/// violations and the config boundary only.
#[derive(Debug, Error)]
pub enum ShelfmarkError {
    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("unknown sort direction: {0}")]
    UnknownSortDirection(String),

    #[error("unknown reading status: {0}")]
    UnknownStatus(String),

    #[error("invalid display color: {0}")]
    InvalidColor(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, ShelfmarkError>;
