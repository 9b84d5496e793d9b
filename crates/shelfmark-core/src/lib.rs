pub mod config;
pub mod dedup;
pub mod error;
pub mod facets;
pub mod filter;
pub mod health;
pub mod models;
pub mod normalize;
pub mod sort;

pub use config::AppConfig;
pub use error::{Result, ShelfmarkError};
pub use models::*;

pub use dedup::{BookCandidate, DuplicateCheck, DuplicateChecker, MatchKind};
pub use facets::{FacetCounts, facet_counts};
pub use filter::filter_books;
pub use health::{
    HealthBand, HealthReport, IssueKind, aggregate_score, analyze_collection, completeness_score,
};
pub use sort::{SortDirection, SortKey, sort_books};
