//! Command-line interface for chapterhouse.
//!
//! Provides commands for ingesting the data tree, browsing and searching
//! the saved catalogue, and reading chapters.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{self, labels};
use crate::domain::{Work, WorkType};
use crate::ingest::Loader;
use crate::library::{store, Catalogue};

/// chapterhouse - Catalogue of serialized translated and illustrated works
#[derive(Parser, Debug)]
#[command(name = "chapterhouse")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rebuild the saved catalogue from the data tree
    Ingest {
        /// Data directory containing books/ (defaults to the configured one)
        #[arg(short, long, env = "CHAPTERHOUSE_DATA")]
        data_dir: Option<PathBuf>,

        /// Add to the saved catalogue instead of rebuilding it
        #[arg(long)]
        merge: bool,
    },

    /// List works in the catalogue
    List {
        /// Maximum number of works to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Search works by keyword, genre, status and type
    Search {
        /// Keyword matched against title, description and creator
        keyword: Option<String>,

        /// Genre to require
        #[arg(short, long, default_value = labels::ALL_GENRES)]
        genre: String,

        /// Status to require
        #[arg(short, long, default_value = labels::ALL_STATUSES)]
        status: String,

        /// Work type to require
        #[arg(short, long, value_enum)]
        kind: Option<KindFilter>,
    },

    /// Show details of a work and its chapters
    Show {
        /// Work ID
        id: i64,
    },

    /// Print a chapter
    Read {
        /// Work ID
        id: i64,

        /// Chapter number
        chapter: i64,
    },

    /// Find chapters of a work containing some text
    Grep {
        /// Work ID
        id: i64,

        /// Text to look for
        text: String,
    },

    /// List every genre in use
    Genres,

    /// List every status in use
    Statuses,

    /// Show resolved configuration (debug)
    Config,
}

/// Work type for CLI (maps to WorkType)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindFilter {
    /// Translated prose series
    Translated,

    /// Illustrated series
    Illustrated,
}

impl From<KindFilter> for WorkType {
    fn from(k: KindFilter) -> Self {
        match k {
            KindFilter::Translated => WorkType::TranslatedWork,
            KindFilter::Illustrated => WorkType::IllustratedWork,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Ingest { data_dir, merge } => ingest(data_dir, merge).await,
            Commands::List { limit } => list_works(limit).await,
            Commands::Search {
                keyword,
                genre,
                status,
                kind,
            } => search_works(keyword.unwrap_or_default(), &genre, &status, kind).await,
            Commands::Show { id } => show_work(id).await,
            Commands::Read { id, chapter } => read_chapter(id, chapter).await,
            Commands::Grep { id, text } => grep_chapters(id, &text).await,
            Commands::Genres => list_genres().await,
            Commands::Statuses => list_statuses().await,
            Commands::Config => show_config(),
        }
    }
}

/// Load the saved catalogue
async fn load_catalogue() -> Result<Catalogue> {
    let path = config::catalogue_path()?;
    store::load(&path)
        .await
        .with_context(|| format!("Failed to load catalogue: {}", path.display()))
}

/// Truncate a title for table output
fn truncate(title: &str, max: usize) -> String {
    if title.chars().count() > max {
        let head: String = title.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        title.to_string()
    }
}

fn print_table(works: &[&Work]) {
    println!("{:<6} {:<16} {:<12} {:<50}", "ID", "TYPE", "STATUS", "TITLE");
    println!("{}", "-".repeat(86));

    for work in works {
        println!(
            "{:<6} {:<16} {:<12} {:<50}",
            work.id,
            work.work_type().to_string(),
            truncate(&work.status, 12),
            truncate(&work.title, 50)
        );
    }
}

/// Ingest the data tree
async fn ingest(data_dir: Option<PathBuf>, merge: bool) -> Result<()> {
    let cfg = config::config()?;
    let books_root = data_dir
        .map(|d| d.join("books"))
        .unwrap_or_else(|| cfg.books_root());

    let mut catalogue = if merge {
        load_catalogue().await?
    } else {
        Catalogue::new()
    };

    let loader = Loader::from_config(cfg)?;
    let report = loader
        .load_directory(&books_root, &mut catalogue)
        .await
        .with_context(|| format!("Failed to ingest {}", books_root.display()))?;

    let path = cfg.catalogue_path();
    store::save(&catalogue, &path)
        .await
        .with_context(|| format!("Failed to save catalogue: {}", path.display()))?;

    eprintln!("Ingested {} works, {} chapters", report.works_added, report.chapters_added);
    if !report.failures.is_empty() {
        eprintln!("Skipped {} documents:", report.failures.len());
        for failure in &report.failures {
            eprintln!("  {}: {}", failure.path.display(), failure.error);
        }
    }
    eprintln!("Catalogue now holds {} works", catalogue.len());

    Ok(())
}

/// List works in the catalogue
async fn list_works(limit: usize) -> Result<()> {
    let catalogue = load_catalogue().await?;

    if catalogue.is_empty() {
        println!("Catalogue is empty. Use 'chapterhouse ingest' to add works.");
        return Ok(());
    }

    let works: Vec<&Work> = catalogue.works().iter().take(limit).collect();
    print_table(&works);
    println!("\nTotal: {} works", catalogue.len());

    Ok(())
}

/// Search the catalogue
async fn search_works(
    keyword: String,
    genre: &str,
    status: &str,
    kind: Option<KindFilter>,
) -> Result<()> {
    let catalogue = load_catalogue().await?;
    let kind = kind
        .map(|k| WorkType::from(k).name())
        .unwrap_or(labels::ALL_TYPES);

    let results = catalogue.search(&keyword, genre, status, kind);

    if results.is_empty() {
        println!("No works match");
        return Ok(());
    }

    println!("Found {} work(s):\n", results.len());
    print_table(&results);

    Ok(())
}

/// Show details of a work
async fn show_work(id: i64) -> Result<()> {
    let catalogue = load_catalogue().await?;
    let work = catalogue.get_by_id(id)?;

    println!("Title: {}", work.title);
    println!("ID: {}", work.id);
    println!("Type: {}", work.work_type());
    println!("Author/Artist: {}", work.creator.as_deref().unwrap_or("Unknown"));
    println!("Status: {}", work.status);
    println!("Added: {}", work.date_added);
    if let Some(origin) = work.origin() {
        println!("Origin: {}", origin);
    }
    if let Some(translator) = work.translator() {
        println!("Translator: {}", translator);
    }
    if let Some(series) = work.series() {
        println!("Series: {}", series);
    }
    if let Some(illustrator) = work.illustrator() {
        println!("Illustrator: {}", illustrator);
    }
    if let Some(cover) = &work.cover_image_path {
        println!("Cover: {}", cover);
    }
    let genres: Vec<&str> = work.genres.iter().map(String::as_str).collect();
    println!("Genres: {}", genres.join(", "));
    println!(
        "Description: {}",
        work.description
            .as_deref()
            .unwrap_or("No description available")
    );

    println!("\nChapters: {}", work.chapters.len());
    for chapter in work.chapters_in_order() {
        let marker = if chapter.has_content() { "" } else { " (no content)" };
        println!("  {:>4}. {}{}", chapter.num_order, chapter.title, marker);
    }

    Ok(())
}

/// Print one chapter
async fn read_chapter(id: i64, number: i64) -> Result<()> {
    let catalogue = load_catalogue().await?;
    let work = catalogue.get_by_id(id)?;

    let chapter = work
        .chapter_by_number(number)
        .ok_or_else(|| anyhow::anyhow!("Chapter {} not found in \"{}\"", number, work.title))?;

    println!("{} - Chapter {}: {}\n", work.title, chapter.num_order, chapter.title);
    match chapter.content_text() {
        Some(text) if !text.is_empty() => println!("{}", text),
        _ => println!("No content available for this chapter."),
    }

    Ok(())
}

/// Search chapter bodies of one work
async fn grep_chapters(id: i64, text: &str) -> Result<()> {
    let catalogue = load_catalogue().await?;
    let chapters = catalogue.search_chapter_content(id, text)?;

    if chapters.is_empty() {
        println!("No chapters contain \"{}\"", text);
        return Ok(());
    }

    for chapter in chapters {
        println!("  {:>4}. {}", chapter.num_order, chapter.title);
    }

    Ok(())
}

async fn list_genres() -> Result<()> {
    let catalogue = load_catalogue().await?;
    for genre in catalogue.all_genres() {
        println!("{}", genre);
    }
    Ok(())
}

async fn list_statuses() -> Result<()> {
    let catalogue = load_catalogue().await?;
    for status in catalogue.all_statuses() {
        println!("{}", status);
    }
    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:       {}", cfg.home.display());
    println!("  Data:       {}", cfg.data.display());
    println!("  Books:      {}", cfg.books_root().display());
    println!("  Catalogue:  {}", cfg.catalogue_path().display());
    println!();
    println!("Ingest:");
    println!("  Document pattern: {}", cfg.ingest.document_pattern);
    println!("  Default status:   {}", cfg.ingest.default_status);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Île des Rêves éternels", 10), "Île des...");
    }

    #[test]
    fn test_cli_parses_search() {
        let cli = Cli::try_parse_from([
            "chapterhouse",
            "search",
            "dragon",
            "--genre",
            "Fantasy",
            "--kind",
            "illustrated",
        ])
        .unwrap();

        match cli.command {
            Commands::Search {
                keyword,
                genre,
                status,
                kind,
            } => {
                assert_eq!(keyword.as_deref(), Some("dragon"));
                assert_eq!(genre, "Fantasy");
                assert_eq!(status, labels::ALL_STATUSES);
                assert!(matches!(kind, Some(KindFilter::Illustrated)));
            }
            other => panic!("Expected search command, got {:?}", other),
        }
    }
}
