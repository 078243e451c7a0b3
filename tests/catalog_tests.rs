//! Catalog loading and validation against fixture files.

use franchise_ranker::catalog::check_path;
use franchise_ranker::error::CatalogErrorKind;
use franchise_ranker::{Catalog, IssueSeverity, RankerError, RegionCode};
use std::path::{Path, PathBuf};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

#[test]
fn yaml_and_json_fixtures_hold_the_same_titles() {
    let yaml = Catalog::from_path(&fixture_path("trio.yaml")).unwrap();
    let json = Catalog::from_path(&fixture_path("trio_bare.json")).unwrap();

    assert_eq!(yaml.len(), 3);
    assert_eq!(yaml.titles(), json.titles());
    assert_eq!(yaml.version(), json.version());
}

#[test]
fn region_data_is_read_per_region() {
    let catalog = Catalog::from_path(&fixture_path("trio.yaml")).unwrap();
    let alpha = catalog.find("alpha").unwrap();

    assert!((alpha.region_data.get(RegionCode::Jp).completion_rate - 0.9).abs() < 1e-12);
    assert_eq!(alpha.region_data.over_indexed().collect::<Vec<_>>(), [RegionCode::Jp]);
}

#[test]
fn lookup_accepts_names_and_suggests_ids() {
    let catalog = Catalog::from_path(&fixture_path("trio.yaml")).unwrap();

    assert_eq!(catalog.lookup("CHARLIE").map(|t| t.id.as_str()), Some("charlie"));
    assert_eq!(catalog.suggest("brav"), Some("bravo"));
    assert_eq!(catalog.suggest("zzzzzz"), None);
}

#[test]
fn duplicate_ids_are_rejected() {
    let err = Catalog::from_path(&fixture_path("duplicate_ids.json")).unwrap_err();
    match err {
        RankerError::Catalog {
            source: CatalogErrorKind::DuplicateId(id),
            ..
        } => assert_eq!(id, "alpha"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn duplicate_ids_are_reported_by_check_path() {
    let (count, issues) = check_path(&fixture_path("duplicate_ids.json")).unwrap();
    assert_eq!(count, 2);
    assert_eq!(issues[0].severity, IssueSeverity::Error);
    assert_eq!(issues[0].field, "id");
}

#[test]
fn missing_region_fails_to_parse() {
    let err = Catalog::from_path(&fixture_path("missing_region.json")).unwrap_err();
    assert!(matches!(err, RankerError::Catalog { .. }), "{err}");
    assert!(err.to_string().contains("missing_region.json"), "{err}");
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Catalog::from_path(&fixture_path("does_not_exist.json")).unwrap_err();
    assert!(matches!(err, RankerError::Io { .. }), "{err}");
}

#[test]
fn fixture_catalog_validates_cleanly() {
    let catalog = Catalog::from_path(&fixture_path("trio.yaml")).unwrap();
    assert!(catalog.validate().is_empty(), "{:?}", catalog.validate());
}

#[test]
fn builtin_catalog_has_unique_ids_and_total_region_data() {
    let catalog = Catalog::builtin().unwrap();
    let mut ids: Vec<&str> = catalog.titles().iter().map(|t| t.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), catalog.len());

    for title in catalog.titles() {
        assert_eq!(title.region_data.iter().count(), RegionCode::ALL.len());
    }
}
