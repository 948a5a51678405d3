//! Catalogue management for ingested works.
//!
//! The catalogue holds every work and answers lookup and search queries.
//! It can be saved to and restored from a single snapshot file.
//!
//! # Storage Layout
//!
//! ```text
//! ~/.chapterhouse/
//! ├── config.yaml               # Optional, see `config`
//! └── catalogue.json            # Versioned snapshot of all works and chapters
//! ```

pub mod catalogue;
pub mod query;
pub mod store;

pub use catalogue::Catalogue;
pub use query::{AdvancedSearch, SearchQuery};
