//! Validator and store used together through the public API, without HTTP.

use movies_service::{
    validate_full, validate_partial, InMemoryMovieStore, MovieStore, ServerConfig,
};
use serde_json::json;

use crate::support::{dune, heat};

#[test]
fn create_then_patch_then_remove() {
    let store = InMemoryMovieStore::new();

    let stored = store.insert(validate_full(&dune()).unwrap()).unwrap();
    assert_eq!(stored.rate, 5.0);

    let patch = validate_partial(&json!({ "title": "X" })).unwrap();
    let updated = store.update(&stored.id, patch).unwrap().unwrap();
    assert_eq!(updated.title, "X");
    assert_eq!(updated.id, stored.id);
    assert_eq!(updated.year, stored.year);
    assert_eq!(updated.genre, stored.genre);
    assert_eq!(updated.rate, stored.rate);

    assert!(store.remove(&stored.id).unwrap());
    assert!(store.get(&stored.id).unwrap().is_none());
}

#[test]
fn client_supplied_id_is_overwritten() {
    let store = InMemoryMovieStore::new();
    let mut input = dune();
    input["id"] = json!("client-chosen");

    let first = store.insert(validate_full(&input).unwrap()).unwrap();
    let second = store.insert(validate_full(&input).unwrap()).unwrap();

    assert_ne!(first.id, "client-chosen");
    assert_ne!(second.id, "client-chosen");
    assert_ne!(first.id, second.id);
    assert_eq!(store.len().unwrap(), 2);
}

#[test]
fn partial_patch_does_not_reset_rate() {
    let store = InMemoryMovieStore::new();
    let stored = store.insert(validate_full(&heat()).unwrap()).unwrap();
    assert_eq!(stored.rate, 8.3);

    let patch = validate_partial(&json!({ "duration": 171 })).unwrap();
    let updated = store.update(&stored.id, patch).unwrap().unwrap();
    assert_eq!(updated.duration, 171);
    assert_eq!(updated.rate, 8.3);
}

#[test]
fn patch_id_key_cannot_move_a_record() {
    let store = InMemoryMovieStore::new();
    let stored = store.insert(validate_full(&dune()).unwrap()).unwrap();

    let patch = validate_partial(&json!({ "id": "hijack", "year": 2022 })).unwrap();
    let updated = store.update(&stored.id, patch).unwrap().unwrap();
    assert_eq!(updated.id, stored.id);
    assert!(store.get("hijack").unwrap().is_none());
}

#[test]
fn default_config_serves_bundled_catalogue() {
    let config = ServerConfig::from_lookup(|_: &str| None).unwrap();
    let store = InMemoryMovieStore::with_movies(config.load_seed().unwrap()).unwrap();
    assert_eq!(store.len().unwrap(), 5);

    let crime = |m: &movies_service::Movie| m.has_genre("crime");
    assert!(!store.list(Some(&crime)).unwrap().is_empty());
}
