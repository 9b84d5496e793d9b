use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;

use shelfmark_core::{
    AppConfig, Book, BookCandidate, BookFilters, DuplicateChecker, Genre, HealthBand, MatchKind,
    ReadingStatus, Series, SortDirection, SortKey, analyze_collection, facet_counts, filter_books,
    sort_books,
};

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "shelfmark",
    about = "Query and integrity tools for a personal book library",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format (for scripts).
    /// Also enabled by setting SHELFMARK_JSON=1.
    #[arg(long, global = true)]
    json: bool,

    /// Library snapshot to read instead of the configured one.
    /// Also settable via SHELFMARK_LIBRARY.
    #[arg(long, global = true)]
    library: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List books, filtered and sorted.
    List {
        /// Substring to look for in title or author.
        #[arg(long)]
        search: Option<String>,
        /// Reading status (want-to-read, reading, finished); repeatable.
        #[arg(long, action = clap::ArgAction::Append)]
        status: Vec<String>,
        /// Genre id; repeatable.
        #[arg(long, action = clap::ArgAction::Append)]
        genre: Vec<String>,
        /// Series id; repeatable.
        #[arg(long, action = clap::ArgAction::Append)]
        series: Vec<String>,
        /// Minimum rating, 1 to 5.
        #[arg(long)]
        min_rating: Option<u8>,
        /// Exact author name.
        #[arg(long)]
        author: Option<String>,
        /// Sort key: title, author, rating, series-position, created-at.
        #[arg(long)]
        sort: Option<String>,
        /// Sort direction: asc or desc.
        #[arg(long)]
        direction: Option<String>,
        #[arg(long, default_value = "50")]
        limit: usize,
    },

    /// Show option counts for every filter dimension.
    Facets {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, action = clap::ArgAction::Append)]
        status: Vec<String>,
        #[arg(long, action = clap::ArgAction::Append)]
        genre: Vec<String>,
        #[arg(long, action = clap::ArgAction::Append)]
        series: Vec<String>,
        #[arg(long)]
        min_rating: Option<u8>,
        #[arg(long)]
        author: Option<String>,
    },

    /// Check whether a book would duplicate one already shelved.
    CheckDup {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        isbn: Option<String>,
    },

    /// Report collection completeness and metadata gaps.
    Health,
}

// ─── Snapshot ───────────────────────────────────────────────────────────────

/// The JSON export the tracking app writes: the collection plus the genre
/// and series catalogs.
#[derive(Debug, Deserialize)]
struct LibrarySnapshot {
    #[serde(default)]
    books: Vec<Book>,
    #[serde(default)]
    genres: Vec<Genre>,
    #[serde(default)]
    series: Vec<Series>,
}

fn parse_snapshot(contents: &str) -> Result<LibrarySnapshot> {
    let mut snapshot: LibrarySnapshot = serde_json::from_str(contents)?;
    let total = snapshot.books.len();
    // Soft-deleted books never reach the engine.
    snapshot.books.retain(|book| !book.is_deleted());
    tracing::debug!(
        total,
        live = snapshot.books.len(),
        "loaded library snapshot"
    );
    Ok(snapshot)
}

fn load_snapshot(path: &Path) -> Result<LibrarySnapshot> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading library snapshot {}", path.display()))?;
    parse_snapshot(&contents)
        .with_context(|| format!("parsing library snapshot {}", path.display()))
}

fn resolve_snapshot_path(cli_override: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    if let Some(path) = cli_override {
        return path;
    }
    if let Ok(path) = std::env::var("SHELFMARK_LIBRARY") {
        return PathBuf::from(path);
    }
    config.snapshot_path()
}

// ─── Main ────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let start = Instant::now();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("SHELFMARK_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // ── Env var overrides ──────────────────────────────────────────────────
    let json_output = cli.json || std::env::var("SHELFMARK_JSON").as_deref() == Ok("1");

    let config = AppConfig::load()?;
    let snapshot_path = resolve_snapshot_path(cli.library, &config);

    match cli.command {
        Commands::List {
            search,
            status,
            genre,
            series,
            min_rating,
            author,
            sort,
            direction,
            limit,
        } => {
            let snapshot = load_snapshot(&snapshot_path)?;
            let filters = build_filters(search, status, genre, series, min_rating, author)?;

            let key: SortKey = match sort {
                Some(name) => name.parse()?,
                None => config.query.sort_key()?,
            };
            let dir: SortDirection = match direction {
                Some(name) => name.parse()?,
                None => config.query.direction()?,
            };

            let matched = filter_books(&snapshot.books, &filters);
            let total = matched.len();
            let mut books = sort_books(&matched, key, dir);
            books.truncate(limit);
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": {
                        "items": books,
                        "total": total,
                        "filters": filters,
                        "sort": key.to_string(),
                        "direction": dir.to_string(),
                    },
                    "meta": { "duration_ms": dur }
                }))?;
            } else if books.is_empty() {
                println!("No books match.");
            } else {
                for book in &books {
                    let rating = book
                        .rating
                        .map(|r| format!("{r}/5"))
                        .unwrap_or_default();
                    println!(
                        "{id}  {title:<40}  {author:<25}  {status:<12}  {rating}",
                        id = short_id(&book.id),
                        title = book.title,
                        author = book.author,
                        status = book.reading_status().to_string(),
                    );
                }
                if total > books.len() {
                    println!("({} more not shown)", total - books.len());
                }
            }
        }

        Commands::Facets {
            search,
            status,
            genre,
            series,
            min_rating,
            author,
        } => {
            let snapshot = load_snapshot(&snapshot_path)?;
            let filters = build_filters(search, status, genre, series, min_rating, author)?;

            // Catalogs enumerate from the full snapshot; the population is
            // the filtered view, so selecting a value narrows the counts
            // without hiding the other options.
            let population = filter_books(&snapshot.books, &filters);
            let authors = author_catalog(&snapshot.books);
            let counts = facet_counts(&population, &snapshot.genres, &snapshot.series, &authors);
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": counts,
                    "meta": { "duration_ms": dur }
                }))?;
            } else {
                println!("Books: {}", counts.total);
                println!("Status:");
                println!("  {:<24} {}", "reading", counts.reading);
                println!("  {:<24} {}", "finished", counts.finished);
                println!("Genres:");
                for (id, n) in &counts.genres {
                    println!("  {id:<24} {n}");
                }
                println!("Series:");
                for (id, n) in &counts.series {
                    println!("  {id:<24} {n}");
                }
                println!("Rating at least:");
                for (floor, n) in &counts.ratings {
                    println!("  {floor:<24} {n}");
                }
                println!("Authors:");
                for (name, n) in &counts.authors {
                    println!("  {name:<24} {n}");
                }
            }
        }

        Commands::CheckDup {
            title,
            author,
            isbn,
        } => {
            let snapshot = load_snapshot(&snapshot_path)?;

            let mut candidate = BookCandidate::new(title, author);
            if let Some(isbn) = isbn {
                candidate = candidate.with_isbn(isbn);
            }

            let checker = DuplicateChecker::new().with_scan_limit(config.dedup.scan_limit);
            let check = checker.check(&candidate, &snapshot.books);
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": {
                        "result": check,
                        "fingerprint": candidate.fingerprint(),
                    },
                    "meta": { "duration_ms": dur }
                }))?;
            } else if check.is_duplicate {
                let reason = match check.match_kind {
                    Some(MatchKind::Isbn) => "same ISBN",
                    Some(MatchKind::TitleAuthor) => "same title and author",
                    None => "unknown",
                };
                println!(
                    "Possible duplicate of {}: {reason}.",
                    check.existing_id.as_deref().unwrap_or("?")
                );
            } else {
                println!("No duplicate found.");
            }
        }

        Commands::Health => {
            let snapshot = load_snapshot(&snapshot_path)?;
            let report = analyze_collection(&snapshot.books);
            let band = HealthBand::from_score(report.completeness_score);
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": { "report": report, "band": band },
                    "meta": { "duration_ms": dur }
                }))?;
            } else {
                println!(
                    "Collection health: {}/100 ({})",
                    report.completeness_score,
                    band.label()
                );
                println!("  Books:    {}", report.total_books);
                println!("  Issues:   {}", report.total_issues);
                println!("  Fixable:  {}", report.fixable_books);

                let gaps: Vec<_> = report
                    .issues
                    .iter()
                    .filter(|(_, ids)| !ids.is_empty())
                    .collect();
                if !gaps.is_empty() {
                    println!("Missing fields:");
                    for (kind, ids) in gaps {
                        println!("  {:<16} {}", kind.label(), ids.len());
                    }
                }
            }
        }
    }

    Ok(())
}

// ─── Helpers ────────────────────────────────────────────────────────────────

fn build_filters(
    search: Option<String>,
    status: Vec<String>,
    genre_ids: Vec<String>,
    series_ids: Vec<String>,
    min_rating: Option<u8>,
    author: Option<String>,
) -> Result<BookFilters> {
    let statuses = status
        .iter()
        .map(|s| s.parse::<ReadingStatus>())
        .collect::<shelfmark_core::Result<Vec<_>>>()?;

    Ok(BookFilters {
        search,
        statuses,
        genre_ids,
        series_ids,
        min_rating,
        author,
    })
}

/// Distinct author names present in the collection, sorted.
fn author_catalog(books: &[Book]) -> Vec<String> {
    let mut authors: Vec<String> = books.iter().map(|b| b.author.clone()).collect();
    authors.sort();
    authors.dedup();
    authors
}

/// First eight chars of an id. Ids are opaque strings from the snapshot,
/// so the cut lands on a char boundary, not a byte offset.
fn short_id(id: &str) -> &str {
    id.char_indices().nth(8).map_or(id, |(i, _)| &id[..i])
}

fn print_json(val: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(val)?);
    Ok(())
}
