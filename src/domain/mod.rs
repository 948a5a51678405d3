//! Domain types for the catalogue.
//!
//! This module contains the core data structures:
//! - Work: a catalogued series, translated or illustrated
//! - Chapter: one ordered unit of text owned by a work

pub mod chapter;
pub mod work;

// Re-export commonly used types
pub use chapter::Chapter;
pub use work::{Work, WorkKind, WorkType, UNSET_ID};
