//! Integration tests for catalog loading and browsing filters

use course_scope::filters::CatalogFilter;
use course_scope::models::{Catalog, CatalogError, Difficulty};
use std::fs;
use tempfile::TempDir;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/catalog.json");

fn catalog() -> Catalog {
    Catalog::load(FIXTURE).expect("fixture catalog loads")
}

#[test]
fn fixture_loads_in_provider_order() {
    let catalog = catalog();
    assert_eq!(catalog.len(), 10);
    assert_eq!(catalog.courses()[0].code, "CS 111");
    assert_eq!(catalog.courses()[8].code, "ENGL 160");
    assert_eq!(catalog.courses()[9].code, "CS 494");
}

#[test]
fn provider_defaults_are_filled() {
    let catalog = catalog();

    let math = catalog.get("MATH 180").expect("MATH 180");
    assert!(math.prerequisite_groups.is_empty());
    assert_eq!(math.difficulty, Some(Difficulty::Challenging));
    assert_eq!(math.id, "math180");

    let engl = catalog.get("ENGL 160").expect("ENGL 160");
    assert_eq!(engl.credits, 3);
    assert_eq!(engl.difficulty(), Difficulty::Light);

    // Credit text from the provider is reduced to its first number
    let topics = catalog.get("CS 494").expect("CS 494");
    assert_eq!(topics.credits, 3);
    assert_eq!(topics.credits_grad, Some(4));
    assert_eq!(topics.prerequisite_groups, vec![vec!["CS 301"]]);

    // Level-based estimate when the provider gives no difficulty
    assert_eq!(catalog.get("CS 251").unwrap().difficulty(), Difficulty::Light);
    assert_eq!(catalog.get("CS 301").unwrap().difficulty(), Difficulty::Moderate);
    assert_eq!(catalog.get("CS 401").unwrap().difficulty(), Difficulty::Challenging);
}

#[test]
fn prerequisite_text_prefers_provider_copy() {
    let catalog = catalog();
    assert_eq!(
        catalog.get("CS 251").unwrap().format_prerequisites(),
        "CS 141 and (MATH 180 or MATH 181)"
    );
    assert_eq!(
        catalog.get("CS 401").unwrap().format_prerequisites(),
        "CS 251 and STAT 381"
    );
    assert_eq!(catalog.get("CS 111").unwrap().format_prerequisites(), "None");
}

#[test]
fn missing_file_reports_path() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("absent.json");

    match Catalog::load(&path) {
        Err(CatalogError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[test]
fn malformed_payload_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("catalog.json");
    fs::write(&path, r#"{"courses": []}"#).expect("write catalog");

    assert!(matches!(Catalog::load(&path), Err(CatalogError::Json(_))));
}

#[test]
fn search_ignores_case_and_spacing() {
    let catalog = catalog();

    let hits = CatalogFilter::new().with_search("cs251").apply(catalog.courses());
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].code, "CS 251");

    let hits = CatalogFilter::new().with_search("HASHING").apply(catalog.courses());
    assert_eq!(hits[0].code, "CS 251");

    let hits = CatalogFilter::new().with_search("program design").apply(catalog.courses());
    assert_eq!(hits.len(), 2);
}

#[test]
fn facets_combine() {
    let catalog = catalog();

    let mut filter = CatalogFilter::new();
    filter.toggle_level(100);
    filter.toggle_credits(3);
    let hits = filter.apply(catalog.courses());
    let codes: Vec<&str> = hits.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["CS 111", "CS 141", "ENGL 160"]);

    // Graduate credit hours also match the credit facet
    let mut filter = CatalogFilter::new();
    filter.toggle_credits(4);
    let hits = filter.apply(catalog.courses());
    let codes: Vec<&str> = hits.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["MATH 181", "CS 251", "CS 401", "CS 494"]);

    filter.clear();
    assert!(!filter.is_active());
    assert_eq!(filter.apply(catalog.courses()).len(), catalog.len());
}
