//! Search filters over works.
//!
//! Every filter is a pure predicate. A filter set to its sentinel (or left
//! empty) lets every work through, so the default query matches the whole
//! catalogue.

use crate::config::labels;
use crate::domain::Work;

/// The four-way filter used by the browse view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Substring of title, description or creator
    pub keyword: String,

    /// Exact genre label
    pub genre: String,

    /// Status label, compared case-insensitively
    pub status: String,

    /// Variant name (`TranslatedWork`, `IllustratedWork` or a legacy alias)
    pub kind: String,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            genre: labels::ALL_GENRES.to_string(),
            status: labels::ALL_STATUSES.to_string(),
            kind: labels::ALL_TYPES.to_string(),
        }
    }
}

impl SearchQuery {
    pub fn new(
        keyword: impl Into<String>,
        genre: impl Into<String>,
        status: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            genre: genre.into(),
            status: status.into(),
            kind: kind.into(),
        }
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// All four predicates ANDed
    pub fn matches(&self, work: &Work) -> bool {
        matches_keyword(work, &self.keyword)
            && matches_genre(work, &self.genre)
            && matches_status(work, &self.status)
            && matches_kind(work, &self.kind)
    }
}

/// Case-insensitive substring match on title, description and creator
pub fn matches_keyword(work: &Work, keyword: &str) -> bool {
    if labels::is_unfiltered(keyword, labels::ALL_KEYWORDS) {
        return true;
    }
    let needle = keyword.to_lowercase();

    work.title.to_lowercase().contains(&needle)
        || work
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
        || work
            .creator
            .as_deref()
            .is_some_and(|c| c.to_lowercase().contains(&needle))
}

pub fn matches_genre(work: &Work, genre: &str) -> bool {
    labels::is_unfiltered(genre, labels::ALL_GENRES) || work.has_genre(genre)
}

pub fn matches_status(work: &Work, status: &str) -> bool {
    labels::is_unfiltered(status, labels::ALL_STATUSES) || same_status(&work.status, status)
}

/// Case-insensitive status equality, folding non-ASCII letters too
fn same_status(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

pub fn matches_kind(work: &Work, kind: &str) -> bool {
    labels::is_unfiltered(kind, labels::ALL_TYPES) || work.work_type().matches_name(kind)
}

/// Multi-valued search: any listed genre and any listed status.
///
/// Empty lists do not filter. The keyword only looks at title and description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvancedSearch {
    pub keyword: Option<String>,
    pub genres: Vec<String>,
    pub statuses: Vec<String>,
}

impl AdvancedSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.keyword = Some(keyword.into());
    }

    /// Add a genre to the accepted set, ignoring repeats
    pub fn add_genre(&mut self, genre: impl Into<String>) {
        let genre = genre.into();
        if !self.genres.contains(&genre) {
            self.genres.push(genre);
        }
    }

    /// Add a status to the accepted set, ignoring repeats
    pub fn add_status(&mut self, status: impl Into<String>) {
        let status = status.into();
        if !self.statuses.contains(&status) {
            self.statuses.push(status);
        }
    }

    pub fn clear_genres(&mut self) {
        self.genres.clear();
    }

    pub fn clear_statuses(&mut self) {
        self.statuses.clear();
    }

    pub fn matches(&self, work: &Work) -> bool {
        let keyword_ok = match self.keyword.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(keyword) => {
                let needle = keyword.to_lowercase();
                work.title.to_lowercase().contains(&needle)
                    || work
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            }
        };

        let genre_ok = self.genres.is_empty() || self.genres.iter().any(|g| work.has_genre(g));

        let status_ok = self.statuses.is_empty()
            || self
                .statuses
                .iter()
                .any(|s| same_status(&work.status, s));

        keyword_ok && genre_ok && status_ok
    }
}
