//! Tests for the store builder and handle lifecycle

use sweep_db::experiment::{ExperimentStore, NewExperimentInfo};

#[test]
fn test_store_builder_default() {
    // Builder defaults to an in-memory store
    let store = ExperimentStore::builder().open();
    assert!(store.is_ok(), "in-memory store should open");
}

#[test]
fn test_store_builder_chain() {
    let dir = tempfile::tempdir().unwrap();
    let store = ExperimentStore::builder()
        .in_memory()
        .path(dir.path().join("chain.db"))
        .echo(true)
        .open();

    assert!(store.is_ok(), "builder with config should open");
    assert!(dir.path().join("chain.db").exists());
}

#[test]
fn test_in_memory_stores_are_isolated() {
    let mut first = ExperimentStore::open_in_memory().unwrap();
    let second = ExperimentStore::open_in_memory().unwrap();

    first
        .create_info(&NewExperimentInfo::new("A_1.txt", "A"))
        .unwrap();

    assert_eq!(first.experiment_count().unwrap(), 1);
    assert_eq!(second.experiment_count().unwrap(), 0);
}

#[test]
fn test_close_is_explicit() {
    let store = ExperimentStore::open_in_memory().unwrap();
    assert!(store.close().is_ok());
}

#[test]
fn test_open_bad_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = ExperimentStore::open(dir.path().join("no/such/dir/experiments.db"));
    assert!(result.is_err());
}
