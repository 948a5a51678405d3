//! chapterhouse - Catalogue of serialized translated and illustrated works
//!
//! Ingests flat work and chapter documents from a data tree, keeps them
//! in an in-memory catalogue, and lets callers browse, filter and read.
//!
//! # Architecture
//!
//! The system is built around a small ingestion pipeline:
//! - A field scanner pulls typed values out of flat records without a parser
//! - A record builder turns each document into a `Work` or a `Chapter`
//! - The catalogue stores works and answers lookup and search queries
//!
//! # Modules
//!
//! - `ingest`: Field scanner, record builder, directory loader
//! - `library`: Catalogue, search queries, snapshot store
//! - `domain`: Data structures (Work, WorkKind, Chapter)
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Load the data tree into the saved catalogue
//! chapterhouse ingest --data-dir ./resources/data
//!
//! # Filter works
//! chapterhouse search dragon --genre Fantasy --status ongoing
//!
//! # Read a chapter
//! chapterhouse read 3 1
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod ingest;
pub mod library;

// Re-export main types at crate root for convenience
pub use domain::{Chapter, Work, WorkKind, WorkType};
pub use error::{LibraryError, LibraryResult};
pub use ingest::{IngestReport, Loader};
pub use library::{AdvancedSearch, Catalogue, SearchQuery};
