//! Canonical labels for statuses, work types and filter sentinels.
//!
//! Single source of truth - import these instead of hardcoding strings.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chapterhouse::config::labels;
//!
//! let any_genre = labels::ALL_GENRES;
//! ```

// ============================================================================
// Statuses
// ============================================================================

/// Status applied when a document does not name one
pub const STATUS_ONGOING: &str = "Ongoing";

pub const STATUS_COMPLETED: &str = "Completed";

pub const STATUS_HIATUS: &str = "Hiatus";

/// Statuses offered to filter controls even when no work uses them yet
pub const KNOWN_STATUSES: [&str; 3] = [STATUS_ONGOING, STATUS_COMPLETED, STATUS_HIATUS];

// ============================================================================
// Work types
// ============================================================================

pub const TYPE_TRANSLATED: &str = "TranslatedWork";

pub const TYPE_ILLUSTRATED: &str = "IllustratedWork";

/// Value of the `type` field that selects a translated work
pub const DOCUMENT_TYPE_NOVEL: &str = "Novel";

// ============================================================================
// Filter sentinels
// ============================================================================

/// Keyword that matches every work
pub const ALL_KEYWORDS: &str = "All";

pub const ALL_GENRES: &str = "All Genres";

pub const ALL_STATUSES: &str = "All Statuses";

pub const ALL_TYPES: &str = "All Types";

/// Whether a filter value means "no filter" for the given sentinel
pub fn is_unfiltered(value: &str, sentinel: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case(sentinel)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_are_case_insensitive() {
        assert!(is_unfiltered("all genres", ALL_GENRES));
        assert!(is_unfiltered("", ALL_STATUSES));
        assert!(is_unfiltered("   ", ALL_TYPES));
        assert!(!is_unfiltered("Drama", ALL_GENRES));
    }

    #[test]
    fn test_default_status_is_known() {
        assert!(KNOWN_STATUSES.contains(&STATUS_ONGOING));
    }
}
