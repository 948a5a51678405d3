//! Works: the catalogued series and their two concrete kinds.

use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::chapter::Chapter;
use crate::config::labels;

/// Id value meaning "not assigned yet"; the catalogue replaces it on insert
pub const UNSET_ID: i64 = 0;

/// Which of the two work variants an entry is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkType {
    /// Translated prose series
    TranslatedWork,

    /// Illustrated series
    IllustratedWork,
}

impl WorkType {
    /// Variant name as shown in type filters
    pub fn name(self) -> &'static str {
        match self {
            WorkType::TranslatedWork => labels::TYPE_TRANSLATED,
            WorkType::IllustratedWork => labels::TYPE_ILLUSTRATED,
        }
    }

    /// Case-insensitive match against a filter value, accepting the legacy aliases
    pub fn matches_name(self, name: &str) -> bool {
        name.parse::<WorkType>().is_ok_and(|t| t == self)
    }
}

impl std::fmt::Display for WorkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for WorkType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "translatedwork" | "translated" | "novel" => Ok(WorkType::TranslatedWork),
            "illustratedwork" | "illustrated" | "roman" => Ok(WorkType::IllustratedWork),
            _ => anyhow::bail!("Unknown work type: {}", s),
        }
    }
}

/// Variant-specific attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkKind {
    Translated {
        origin: Option<String>,
        translator: Option<String>,
    },
    Illustrated {
        series: Option<String>,
        illustrator: Option<String>,
    },
}

impl WorkKind {
    pub fn translated() -> Self {
        WorkKind::Translated {
            origin: None,
            translator: None,
        }
    }

    pub fn illustrated() -> Self {
        WorkKind::Illustrated {
            series: None,
            illustrator: None,
        }
    }

    pub fn work_type(&self) -> WorkType {
        match self {
            WorkKind::Translated { .. } => WorkType::TranslatedWork,
            WorkKind::Illustrated { .. } => WorkType::IllustratedWork,
        }
    }
}

/// A catalogued work with its chapters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
    /// Catalogue-unique identifier, `UNSET_ID` until inserted
    pub id: i64,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub cover_image_path: Option<String>,

    /// Author or artist
    #[serde(default)]
    pub creator: Option<String>,

    /// Lifecycle label (Ongoing, Completed, Hiatus, ...)
    pub status: String,

    #[serde(default)]
    pub genres: BTreeSet<String>,

    pub date_added: NaiveDate,

    /// Chapters in insertion order; see `chapters_in_order` for reading order
    #[serde(default)]
    pub chapters: Vec<Chapter>,

    pub kind: WorkKind,
}

impl Work {
    /// Create a work of the given kind, added today with the default status
    pub fn new(id: i64, title: impl Into<String>, kind: WorkKind) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            cover_image_path: None,
            creator: None,
            status: labels::STATUS_ONGOING.to_string(),
            genres: BTreeSet::new(),
            date_added: Utc::now().date_naive(),
            chapters: Vec::new(),
            kind,
        }
    }

    pub fn work_type(&self) -> WorkType {
        self.kind.work_type()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn set_cover_image_path(&mut self, path: Option<String>) {
        self.cover_image_path = path;
    }

    pub fn set_creator(&mut self, creator: Option<String>) {
        self.creator = creator;
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn set_date_added(&mut self, date: NaiveDate) {
        self.date_added = date;
    }

    /// Add a genre. Blank labels and duplicates are ignored; returns whether the set changed.
    pub fn add_genre(&mut self, genre: impl Into<String>) -> bool {
        let genre = genre.into();
        if genre.trim().is_empty() {
            return false;
        }
        self.genres.insert(genre)
    }

    pub fn remove_genre(&mut self, genre: &str) -> bool {
        self.genres.remove(genre)
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.contains(genre)
    }

    pub fn add_chapter(&mut self, chapter: Chapter) {
        self.chapters.push(chapter);
    }

    /// Chapters sorted by `num_order`; ties keep insertion order
    pub fn chapters_in_order(&self) -> Vec<&Chapter> {
        let mut ordered: Vec<&Chapter> = self.chapters.iter().collect();
        ordered.sort_by_key(|c| c.num_order);
        ordered
    }

    /// First chapter in reading order with the given number
    pub fn chapter_by_number(&self, num_order: i64) -> Option<&Chapter> {
        self.chapters_in_order()
            .into_iter()
            .find(|c| c.num_order == num_order)
    }

    /// Translated works: country or language of origin
    pub fn origin(&self) -> Option<&str> {
        match &self.kind {
            WorkKind::Translated { origin, .. } => origin.as_deref(),
            WorkKind::Illustrated { .. } => None,
        }
    }

    pub fn translator(&self) -> Option<&str> {
        match &self.kind {
            WorkKind::Translated { translator, .. } => translator.as_deref(),
            WorkKind::Illustrated { .. } => None,
        }
    }

    pub fn series(&self) -> Option<&str> {
        match &self.kind {
            WorkKind::Illustrated { series, .. } => series.as_deref(),
            WorkKind::Translated { .. } => None,
        }
    }

    pub fn illustrator(&self) -> Option<&str> {
        match &self.kind {
            WorkKind::Illustrated { illustrator, .. } => illustrator.as_deref(),
            WorkKind::Translated { .. } => None,
        }
    }
}
