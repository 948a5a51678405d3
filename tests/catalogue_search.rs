//! Catalogue Integration Tests
//!
//! Tests for id assignment, aggregates and multi-predicate search.

use chapterhouse::config::labels;
use chapterhouse::domain::{Chapter, Work, WorkKind, WorkType};
use chapterhouse::ingest::build_work;
use chapterhouse::library::{AdvancedSearch, Catalogue, SearchQuery};
use chapterhouse::LibraryError;

fn sample_catalogue() -> Catalogue {
    let mut catalogue = Catalogue::new();

    catalogue.add(build_work(
        r#"{"type": "Novel", "title": "Dragon Ascendant", "creator": "Mo Yu", "status": "Ongoing", "genres": ["Fantasy", "Action"]}"#,
    ))
    .unwrap();
    catalogue.add(build_work(
        r#"{"type": "Roman", "title": "Quiet Harbor", "description": "A dragon-shaped lighthouse.", "status": "Completed", "genres": ["Slice of Life"]}"#,
    ))
    .unwrap();
    catalogue.add(build_work(
        r#"{"type": "Roman", "title": "Ink and Steel", "creator": "R. Dragomir", "status": "Hiatus", "genres": ["Action"]}"#,
    ))
    .unwrap();
    catalogue.add(build_work(
        r#"{"type": "Novel", "title": "Tea House", "status": "completed", "genres": ["Slice of Life", "Comedy"]}"#,
    ))
    .unwrap();

    catalogue
}

fn titles(works: &[&Work]) -> Vec<String> {
    works.iter().map(|w| w.title.clone()).collect()
}

#[test]
fn test_sentinel_search_returns_everything_in_order() {
    let catalogue = sample_catalogue();
    let results = catalogue.search(
        "",
        labels::ALL_GENRES,
        labels::ALL_STATUSES,
        labels::ALL_TYPES,
    );

    assert_eq!(
        titles(&results),
        vec!["Dragon Ascendant", "Quiet Harbor", "Ink and Steel", "Tea House"]
    );
}

#[test]
fn test_keyword_searches_title_description_and_creator() {
    let catalogue = sample_catalogue();
    let results = catalogue.search(
        "DRAGO",
        labels::ALL_GENRES,
        labels::ALL_STATUSES,
        labels::ALL_TYPES,
    );

    assert_eq!(
        titles(&results),
        vec!["Dragon Ascendant", "Quiet Harbor", "Ink and Steel"]
    );
}

#[test]
fn test_filters_are_anded() {
    let catalogue = sample_catalogue();

    let results = catalogue.search("", "Action", labels::ALL_STATUSES, "IllustratedWork");
    assert_eq!(titles(&results), vec!["Ink and Steel"]);

    let results = catalogue.search("", "Slice of Life", "COMPLETED", labels::ALL_TYPES);
    assert_eq!(titles(&results), vec!["Quiet Harbor", "Tea House"]);

    let results = catalogue.search("tea", "Slice of Life", "completed", "TranslatedWork");
    assert_eq!(titles(&results), vec!["Tea House"]);

    let results = catalogue.search("tea", "Action", labels::ALL_STATUSES, labels::ALL_TYPES);
    assert!(results.is_empty());
}

#[test]
fn test_query_builder_matches_search() {
    let catalogue = sample_catalogue();
    let query = SearchQuery::default().with_genre("Action").with_kind("Novel");

    assert_eq!(titles(&catalogue.query(&query)), vec!["Dragon Ascendant"]);
}

#[test]
fn test_search_does_not_mutate() {
    let catalogue = sample_catalogue();
    let before = catalogue.clone();

    let _ = catalogue.search("dragon", "Fantasy", "Ongoing", "TranslatedWork");
    assert_eq!(catalogue, before);
}

#[test]
fn test_aggregates() {
    let catalogue = sample_catalogue();

    let genres: Vec<String> = catalogue.all_genres().into_iter().collect();
    assert_eq!(genres, vec!["Action", "Comedy", "Fantasy", "Slice of Life"]);

    let statuses = catalogue.all_statuses();
    assert_eq!(statuses.len(), 4);
    assert!(statuses.contains("completed"));
    assert!(statuses.contains("Completed"));
}

#[test]
fn test_auto_ids_never_collide_with_explicit_ids() {
    let mut catalogue = Catalogue::new();
    let first = catalogue.add(Work::new(0, "A", WorkKind::translated())).unwrap();
    let explicit = catalogue.add(Work::new(50, "B", WorkKind::illustrated())).unwrap();
    let next = catalogue.add(Work::new(0, "C", WorkKind::translated())).unwrap();

    assert_ne!(first, explicit);
    assert!(next > 50);

    let ids: Vec<i64> = catalogue.works().iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![first, 50, next]);
}

#[test]
fn test_single_filter_helpers() {
    let catalogue = sample_catalogue();

    assert_eq!(catalogue.search_by_title("").len(), 0);
    assert_eq!(titles(&catalogue.search_by_title("harbor")), vec!["Quiet Harbor"]);
    assert_eq!(catalogue.filter_by_genre("").len(), 4);
    assert_eq!(catalogue.filter_by_genre("Comedy").len(), 1);
    assert_eq!(catalogue.filter_by_status("completed").len(), 2);
    assert_eq!(catalogue.filter_by_type(WorkType::IllustratedWork).len(), 2);
}

#[test]
fn test_advanced_search() {
    let catalogue = sample_catalogue();
    let mut search = AdvancedSearch::new();
    search.add_genre("Fantasy");
    search.add_genre("Comedy");

    assert_eq!(
        titles(&catalogue.advanced_search(&search)),
        vec!["Dragon Ascendant", "Tea House"]
    );

    search.add_status("Ongoing");
    assert_eq!(
        titles(&catalogue.advanced_search(&search)),
        vec!["Dragon Ascendant"]
    );
}

#[test]
fn test_search_chapter_content() {
    let mut catalogue = Catalogue::new();
    let mut work = Work::new(0, "Serial", WorkKind::translated());
    work.add_chapter(Chapter::new(1, "Two", 2).with_content("The storm broke."));
    work.add_chapter(Chapter::new(2, "One", 1).with_content("A STORM gathered."));
    work.add_chapter(Chapter::new(3, "Three", 3).with_content("Calm."));
    let id = catalogue.add(work).unwrap();

    let hits = catalogue.search_chapter_content(id, "storm").unwrap();
    let hit_titles: Vec<&str> = hits.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(hit_titles, vec!["One", "Two"]);

    assert!(catalogue.search_chapter_content(id, " ").unwrap().is_empty());
    assert!(matches!(
        catalogue.search_chapter_content(999, "storm"),
        Err(LibraryError::WorkNotFound { id: 999 })
    ));
}

#[test]
fn test_status_search_ignores_accented_case() {
    let mut catalogue = Catalogue::new();
    catalogue
        .add(build_work(r#"{"title": "Le Pont", "status": "Terminé"}"#))
        .unwrap();

    let hits = catalogue.search("", labels::ALL_GENRES, "TERMINÉ", labels::ALL_TYPES);
    assert_eq!(titles(&hits), vec!["Le Pont"]);
    assert_eq!(catalogue.filter_by_status("terminé").len(), 1);
}
