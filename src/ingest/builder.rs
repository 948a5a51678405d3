//! Record builder: one document buffer in, one work or chapter out.
//!
//! Every field goes through the field scanner. Work documents never fail
//! on bad optional fields; chapter documents fail only when the body text
//! is missing, so the caller can drop that chapter and keep its siblings.

use chrono::{NaiveDate, Utc};

use super::fields::{extract_int, extract_string, extract_string_array, has_key};
use crate::config::labels;
use crate::domain::{Chapter, Work, WorkKind};
use crate::error::{LibraryError, LibraryResult};

/// Date format of the `dateAdded` field
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Defaults applied while building works
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Status for documents without one
    pub default_status: String,

    /// Date for documents without a usable `dateAdded`
    pub ingestion_date: NaiveDate,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            default_status: labels::STATUS_ONGOING.to_string(),
            ingestion_date: Utc::now().date_naive(),
        }
    }
}

impl BuildOptions {
    pub fn with_default_status(mut self, status: impl Into<String>) -> Self {
        self.default_status = status.into();
        self
    }

    pub fn with_ingestion_date(mut self, date: NaiveDate) -> Self {
        self.ingestion_date = date;
        self
    }
}

/// Whether the `type` field selects a translated work
fn is_translated(doc_type: Option<&str>) -> bool {
    match doc_type {
        None => true,
        Some(t) => {
            let t = t.trim();
            t.eq_ignore_ascii_case(labels::DOCUMENT_TYPE_NOVEL)
                || t.eq_ignore_ascii_case(labels::TYPE_TRANSLATED)
        }
    }
}

/// Parse `dateAdded`, falling back to the ingestion date
fn parse_date_added(raw: Option<&str>, fallback: NaiveDate) -> NaiveDate {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => fallback,
        Some(value) => match NaiveDate::parse_from_str(value, DATE_FORMAT) {
            Ok(date) => date,
            Err(e) => {
                tracing::warn!(date = value, error = %e, "Invalid date format, using ingestion date");
                fallback
            }
        },
    }
}

/// Build a work with default options
pub fn build_work(buffer: &str) -> Work {
    build_work_with(buffer, &BuildOptions::default())
}

/// Build a work from a document buffer
pub fn build_work_with(buffer: &str, options: &BuildOptions) -> Work {
    let doc_type = extract_string(buffer, "type");
    let translated = is_translated(doc_type.as_deref());

    let id = extract_int(buffer, "id");
    let title = extract_string(buffer, "title").unwrap_or_default();
    let description = extract_string(buffer, "description");
    let cover_image = extract_string(buffer, "coverImage");
    let status = extract_string(buffer, "status");
    let creator = if has_key(buffer, "creator") {
        extract_string(buffer, "creator")
    } else {
        extract_string(buffer, "artist")
    };
    let date_added = extract_string(buffer, "dateAdded");
    let genres = extract_string_array(buffer, "genres");

    let kind = if translated {
        WorkKind::Translated {
            origin: extract_string(buffer, "origin"),
            translator: extract_string(buffer, "translator"),
        }
    } else {
        WorkKind::Illustrated {
            series: extract_string(buffer, "series"),
            illustrator: extract_string(buffer, "illustrator"),
        }
    };

    let mut work = Work::new(id, title, kind);
    work.set_description(description);
    work.set_cover_image_path(cover_image);
    work.set_creator(creator);
    work.set_status(status.unwrap_or_else(|| options.default_status.clone()));
    work.set_date_added(parse_date_added(
        date_added.as_deref(),
        options.ingestion_date,
    ));

    for genre in genres {
        work.add_genre(genre);
    }

    work
}

/// Build a chapter from a document buffer.
///
/// Fails with `ChapterContent` when `contentText` is absent or empty.
pub fn build_chapter(buffer: &str) -> LibraryResult<Chapter> {
    let id = extract_int(buffer, "id");
    let title = extract_string(buffer, "title").unwrap_or_default();
    let num_order = extract_int(buffer, "chapterNumber");
    let content = extract_string(buffer, "contentText");

    match content {
        Some(text) if !text.is_empty() => Ok(Chapter::new(id, title, num_order).with_content(text)),
        _ => Err(LibraryError::ChapterContent {
            message: format!("Chapter {} ({:?}) content is empty or missing", id, title),
        }),
    }
}
