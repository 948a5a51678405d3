//! In-memory catalogue of works.
//!
//! Owns every work, assigns ids and answers lookup, aggregate and search
//! queries. No internal locking: mutate from one owner, share reads after.

use std::collections::BTreeSet;

use super::query::{self, AdvancedSearch, SearchQuery};
use crate::domain::{Chapter, Work, WorkType, UNSET_ID};
use crate::error::{LibraryError, LibraryResult};

/// First id handed out by an empty catalogue
const FIRST_ID: i64 = 1;

/// Catalogue of all works
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogue {
    works: Vec<Work>,
    next_id: i64,
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalogue {
    /// Create a new empty catalogue
    pub fn new() -> Self {
        Self {
            works: Vec::new(),
            next_id: FIRST_ID,
        }
    }

    /// Rebuild a catalogue from stored works, keeping the id counter ahead of every id
    pub fn from_parts(works: Vec<Work>, next_id: i64) -> Self {
        let highest = works.iter().map(|w| w.id).max().unwrap_or(0);
        Self {
            works,
            next_id: next_id.max(highest.saturating_add(1)).max(FIRST_ID),
        }
    }

    /// Id the next work without one will receive
    pub fn next_id(&self) -> i64 {
        self.next_id
    }

    /// Add a work, returning its effective id.
    ///
    /// An unset id is replaced by the next free one. An explicit id moves
    /// the counter past it; if a work with that id already exists it is
    /// replaced in place. The counter must stay representable, so
    /// `i64::MAX` is rejected with `IdOutOfRange` and the catalogue is left
    /// unchanged.
    pub fn add(&mut self, mut work: Work) -> LibraryResult<i64> {
        if work.id == UNSET_ID {
            work.id = self.next_id;
        }
        let id = work.id;
        let after = id
            .checked_add(1)
            .ok_or(LibraryError::IdOutOfRange { id })?;
        self.next_id = self.next_id.max(after);

        if let Some(existing) = self.works.iter_mut().find(|w| w.id == id) {
            tracing::debug!(id, title = %work.title, "Replacing work with same id");
            *existing = work;
        } else {
            self.works.push(work);
        }

        Ok(id)
    }

    /// Get a work by id
    pub fn get_by_id(&self, id: i64) -> LibraryResult<&Work> {
        self.works
            .iter()
            .find(|w| w.id == id)
            .ok_or(LibraryError::WorkNotFound { id })
    }

    /// Get a work by id for mutation through its setters
    pub fn get_by_id_mut(&mut self, id: i64) -> LibraryResult<&mut Work> {
        self.works
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(LibraryError::WorkNotFound { id })
    }

    /// Remove a work by id
    pub fn remove(&mut self, id: i64) -> LibraryResult<Work> {
        let pos = self
            .works
            .iter()
            .position(|w| w.id == id)
            .ok_or(LibraryError::WorkNotFound { id })?;
        Ok(self.works.remove(pos))
    }

    /// All works in insertion order
    pub fn works(&self) -> &[Work] {
        &self.works
    }

    /// Get the number of works
    pub fn len(&self) -> usize {
        self.works.len()
    }

    /// Check if the catalogue is empty
    pub fn is_empty(&self) -> bool {
        self.works.is_empty()
    }

    /// Every genre used by at least one work
    pub fn all_genres(&self) -> BTreeSet<String> {
        self.works
            .iter()
            .flat_map(|w| w.genres.iter().cloned())
            .collect()
    }

    /// Every status used by at least one work
    pub fn all_statuses(&self) -> BTreeSet<String> {
        self.works.iter().map(|w| w.status.clone()).collect()
    }

    /// Keyword, genre, status and type filters ANDed; sentinels disable a filter
    pub fn search(&self, keyword: &str, genre: &str, status: &str, kind: &str) -> Vec<&Work> {
        self.query(&SearchQuery::new(keyword, genre, status, kind))
    }

    /// Run a prepared query, preserving catalogue order
    pub fn query(&self, query: &SearchQuery) -> Vec<&Work> {
        self.works.iter().filter(|w| query.matches(w)).collect()
    }

    /// Run a multi-valued search, preserving catalogue order
    pub fn advanced_search(&self, search: &AdvancedSearch) -> Vec<&Work> {
        self.works.iter().filter(|w| search.matches(w)).collect()
    }

    /// Works whose title contains `title`; a blank title finds nothing
    pub fn search_by_title(&self, title: &str) -> Vec<&Work> {
        if title.trim().is_empty() {
            return Vec::new();
        }
        let needle = title.to_lowercase();
        self.works
            .iter()
            .filter(|w| w.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Works carrying `genre`; a blank genre returns everything
    pub fn filter_by_genre(&self, genre: &str) -> Vec<&Work> {
        self.works
            .iter()
            .filter(|w| genre.trim().is_empty() || w.has_genre(genre))
            .collect()
    }

    /// Works with `status`; a blank status returns everything
    pub fn filter_by_status(&self, status: &str) -> Vec<&Work> {
        self.works
            .iter()
            .filter(|w| query::matches_status(w, status))
            .collect()
    }

    /// Works of one variant
    pub fn filter_by_type(&self, work_type: WorkType) -> Vec<&Work> {
        self.works
            .iter()
            .filter(|w| w.work_type() == work_type)
            .collect()
    }

    /// Chapters of one work whose body contains `text`.
    ///
    /// Hits come back in reading order (`num_order`), not insertion order.
    /// An unknown work is `WorkNotFound` rather than an empty result.
    pub fn search_chapter_content(&self, work_id: i64, text: &str) -> LibraryResult<Vec<&Chapter>> {
        let work = self.get_by_id(work_id)?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let needle = text.to_lowercase();

        Ok(work
            .chapters_in_order()
            .into_iter()
            .filter(|c| c.content_contains(&needle))
            .collect())
    }
}
