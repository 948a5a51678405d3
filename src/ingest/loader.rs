//! Directory ingestion into a catalogue.
//!
//! Walks the books tree, builds one work per series directory and attaches
//! its chapters. A document that fails to build is logged and recorded in
//! the report; the walk always continues with the next document.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;
use tokio::fs;

use super::builder::{build_chapter, build_work_with, BuildOptions};
use crate::config::ResolvedConfig;
use crate::domain::Work;
use crate::error::{LibraryError, LibraryResult};
use crate::library::Catalogue;

/// Directory holding the work document of a series
pub const INFORMATION_DIR: &str = "information";

/// Directory holding the chapter documents of a series
pub const CHAPTERS_DIR: &str = "chapters";

/// A document that could not be ingested
#[derive(Debug, Clone)]
pub struct IngestFailure {
    /// Offending document or directory
    pub path: PathBuf,

    /// Error message
    pub error: String,

    /// Whether only a chapter was lost (the work itself was kept)
    pub chapter: bool,
}

/// Outcome of one ingestion pass
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub works_added: usize,
    pub chapters_added: usize,
    pub failures: Vec<IngestFailure>,
}

impl IngestReport {
    fn record(&mut self, path: &Path, error: &LibraryError) {
        tracing::warn!(path = %path.display(), error = %error, "Skipping document");
        self.failures.push(IngestFailure {
            path: path.to_path_buf(),
            error: error.to_string(),
            chapter: error.is_chapter_content(),
        });
    }
}

/// Loads `<root>/<kind>/<series>/{information,chapters}/*.json` trees
#[derive(Debug, Clone)]
pub struct Loader {
    pattern: Pattern,
    options: BuildOptions,
}

impl Loader {
    /// Create a loader matching document file names against `document_pattern`
    pub fn new(document_pattern: &str, options: BuildOptions) -> Result<Self> {
        let pattern = Pattern::new(document_pattern)
            .with_context(|| format!("Invalid document pattern: {}", document_pattern))?;
        Ok(Self { pattern, options })
    }

    /// Create a loader from the resolved configuration
    pub fn from_config(config: &ResolvedConfig) -> Result<Self> {
        let options =
            BuildOptions::default().with_default_status(config.ingest.default_status.clone());
        Self::new(&config.ingest.document_pattern, options)
    }

    /// Ingest every series below `books_root` into `catalogue`
    pub async fn load_directory(
        &self,
        books_root: &Path,
        catalogue: &mut Catalogue,
    ) -> LibraryResult<IngestReport> {
        if !books_root.is_dir() {
            return Err(LibraryError::FileOperation {
                path: books_root.to_path_buf(),
                message: "Books directory not found".to_string(),
            });
        }

        tracing::info!(root = %books_root.display(), "Looking for works");
        let mut report = IngestReport::default();

        for kind_dir in subdirectories(books_root).await? {
            let series_dirs = match subdirectories(&kind_dir).await {
                Ok(dirs) => dirs,
                Err(e) => {
                    report.record(&kind_dir, &e);
                    continue;
                }
            };
            tracing::debug!(dir = %kind_dir.display(), series = series_dirs.len(), "Processing work type directory");

            for series_dir in series_dirs {
                match self.load_series(&series_dir, &mut report).await {
                    Ok(Some(work)) => {
                        let title = work.title.clone();
                        match catalogue.add(work) {
                            Ok(id) => {
                                report.works_added += 1;
                                tracing::info!(id, %title, "Added work to catalogue");
                            }
                            Err(e) => report.record(&series_dir, &e),
                        }
                    }
                    Ok(None) => {}
                    Err(e) => report.record(&series_dir, &e),
                }
            }
        }

        tracing::info!(
            works = report.works_added,
            chapters = report.chapters_added,
            failures = report.failures.len(),
            "Ingestion finished"
        );
        Ok(report)
    }

    /// Build one series. `Ok(None)` when the directory has no work document.
    async fn load_series(
        &self,
        series_dir: &Path,
        report: &mut IngestReport,
    ) -> LibraryResult<Option<Work>> {
        let info_dir = series_dir.join(INFORMATION_DIR);
        if !info_dir.is_dir() {
            tracing::debug!(dir = %series_dir.display(), "No information directory");
            return Ok(None);
        }

        let Some(info_path) = self.documents(&info_dir).await?.into_iter().next() else {
            tracing::debug!(dir = %info_dir.display(), "No work document");
            return Ok(None);
        };

        let buffer = read_document(&info_path).await?;
        let mut work = build_work_with(&buffer, &self.options);

        let chapters_dir = series_dir.join(CHAPTERS_DIR);
        if chapters_dir.is_dir() {
            for chapter_path in self.documents(&chapters_dir).await? {
                let built = match fs::read_to_string(&chapter_path).await {
                    Ok(buffer) => build_chapter(&buffer),
                    Err(e) => Err(LibraryError::ChapterContent {
                        message: format!(
                            "Failed to load chapter content from {}: {e}",
                            chapter_path.display()
                        ),
                    }),
                };

                match built {
                    Ok(chapter) => {
                        work.add_chapter(chapter);
                        report.chapters_added += 1;
                    }
                    Err(e) => report.record(&chapter_path, &e),
                }
            }
        }

        Ok(Some(work))
    }

    /// Files in `dir` whose name matches the document pattern, sorted by name
    async fn documents(&self, dir: &Path) -> LibraryResult<Vec<PathBuf>> {
        let mut found = Vec::new();
        let mut entries = fs::read_dir(dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if self.pattern.matches(name) {
                    found.push(path);
                }
            }
        }

        found.sort();
        Ok(found)
    }
}

/// Subdirectories of `dir`, sorted by name
async fn subdirectories(dir: &Path) -> LibraryResult<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    let mut entries = fs::read_dir(dir).await.map_err(|e| LibraryError::FileOperation {
        path: dir.to_path_buf(),
        message: format!("Failed to list directory: {e}"),
    })?;

    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_dir() {
            dirs.push(entry.path());
        }
    }

    dirs.sort();
    Ok(dirs)
}

async fn read_document(path: &Path) -> LibraryResult<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| LibraryError::FileOperation {
            path: path.to_path_buf(),
            message: format!("Error reading file: {e}"),
        })
}
