//! Record Builder Integration Tests
//!
//! Tests for building works and chapters from full documents.

use chapterhouse::domain::{WorkKind, WorkType};
use chapterhouse::ingest::{build_chapter, build_work, build_work_with, extract_string, BuildOptions};
use chapterhouse::LibraryError;
use chrono::NaiveDate;

const TRANSLATED_DOC: &str = r#"{
  "id": 12,
  "type": "Novel",
  "title": "The \"Silent\" Sword",
  "description": "A wanderer\nreturns home, C:\\ and all.",
  "coverImage": "covers/silent_sword.jpg",
  "status": "Completed",
  "creator": "Gu Long",
  "dateAdded": "2023-05-17",
  "genres": ["Wuxia", "Drama, Tragedy", "Wuxia"],
  "origin": "China",
  "translator": "Ann Lee"
}"#;

const ILLUSTRATED_DOC: &str = r#"{
  "id": "4",
  "type": "Roman",
  "title": "Harbor Lights",
  "description": null,
  "artist": "Kim Seo",
  "status": "Hiatus",
  "dateAdded": "2022-11-01",
  "genres": ["Slice of Life"],
  "series": "Harbor",
  "illustrator": "Park Ji"
}"#;

#[test]
fn test_translated_work_round_trip() {
    let work = build_work(TRANSLATED_DOC);

    assert_eq!(work.id, 12);
    assert_eq!(work.work_type(), WorkType::TranslatedWork);
    assert_eq!(work.title, "The \"Silent\" Sword");
    assert_eq!(
        work.description.as_deref(),
        Some("A wanderer\nreturns home, C:\\ and all.")
    );
    assert_eq!(work.cover_image_path.as_deref(), Some("covers/silent_sword.jpg"));
    assert_eq!(work.status, "Completed");
    assert_eq!(work.creator.as_deref(), Some("Gu Long"));
    assert_eq!(work.date_added, NaiveDate::from_ymd_opt(2023, 5, 17).unwrap());
    assert_eq!(work.genres.len(), 2);
    assert!(work.has_genre("Wuxia"));
    assert!(work.has_genre("Drama, Tragedy"));
    assert_eq!(
        work.kind,
        WorkKind::Translated {
            origin: Some("China".to_string()),
            translator: Some("Ann Lee".to_string()),
        }
    );
    assert!(work.chapters.is_empty());
}

#[test]
fn test_illustrated_work_round_trip() {
    let work = build_work(ILLUSTRATED_DOC);

    assert_eq!(work.id, 4);
    assert_eq!(work.work_type(), WorkType::IllustratedWork);
    assert_eq!(work.description, None);
    assert_eq!(work.creator.as_deref(), Some("Kim Seo"));
    assert_eq!(work.series(), Some("Harbor"));
    assert_eq!(work.illustrator(), Some("Park Ji"));
    assert_eq!(work.origin(), None);
    assert_eq!(work.date_added, NaiveDate::from_ymd_opt(2022, 11, 1).unwrap());
}

#[test]
fn test_variant_fields_of_other_kind_are_ignored() {
    let doc = r#"{"type": "Roman", "title": "T", "origin": "Japan", "series": "S"}"#;
    let work = build_work(doc);
    assert_eq!(work.origin(), None);
    assert_eq!(work.series(), Some("S"));
}

#[test]
fn test_malformed_optional_fields_never_fail() {
    let options = BuildOptions::default()
        .with_ingestion_date(NaiveDate::from_ymd_opt(2020, 2, 29).unwrap());
    let doc = r#"{"id": "twelve", "title": "T", "dateAdded": "17/05/2023", "genres": "Drama", "status": null}"#;

    let work = build_work_with(doc, &options);
    assert_eq!(work.id, 0);
    assert_eq!(work.date_added, NaiveDate::from_ymd_opt(2020, 2, 29).unwrap());
    assert!(work.genres.is_empty());
    assert_eq!(work.status, "Ongoing");
}

#[test]
fn test_chapter_content_error() {
    let doc = r#"{"id": 1, "title": "Blank", "chapterNumber": 1, "contentText": ""}"#;
    match build_chapter(doc) {
        Err(LibraryError::ChapterContent { .. }) => {}
        other => panic!("Expected ChapterContent error, got {:?}", other),
    }
}

#[test]
fn test_chapter_exposes_exact_text() {
    let doc = r#"{"id": 9, "title": "Rain", "chapterNumber": 3, "contentText": "\"Stay,\" she said.\n\tHe stayed."}"#;
    let chapter = build_chapter(doc).unwrap();

    assert_eq!(chapter.num_order, 3);
    assert_eq!(chapter.content_text(), Some("\"Stay,\" she said.\n\tHe stayed."));
    assert_eq!(
        chapter.content_text().map(str::to_string),
        extract_string(doc, "contentText")
    );
}
