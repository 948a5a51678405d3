//! Document ingestion pipeline.
//!
//! Turns the data tree of work and chapter documents into catalogue
//! entries. The pipeline:
//!
//! 1. **Fields**: keyed extraction of strings, integers and string arrays
//! 2. **Builder**: one document buffer becomes one `Work` or `Chapter`
//! 3. **Loader**: walks the books directory and fills a `Catalogue`
//!
//! # Architecture
//!
//! ```text
//! books/<type>/<series>/information/*.json → Fields → Builder → Catalogue
//! books/<type>/<series>/chapters/*.json    ↗
//! ```

pub mod builder;
pub mod fields;
pub mod loader;

// Re-export key types
pub use builder::{build_chapter, build_work, build_work_with, BuildOptions};
pub use fields::{extract_int, extract_string, extract_string_array};
pub use loader::{IngestFailure, IngestReport, Loader};
