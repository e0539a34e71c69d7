//! File store error handling tests
//!
//! Tests error conditions, external modification and edge cases

use std::fs;

use setcache::error::Error;
use setcache::store_adapter::StoreAdapter;
use setcache_store_adapter_fs::{AdapterConfig, FsStore};
use tempfile::TempDir;

fn create_test_store() -> (FsStore, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let store = FsStore::new(temp_dir.path().join("settings.json")).expect("Failed to create store");
	(store, temp_dir)
}

#[test]
fn test_malformed_file() {
	let (mut store, _temp) = create_test_store();
	fs::write(store.path(), "{\"a\": ").expect("Failed to write file");

	let result = store.load();

	assert!(matches!(result, Err(Error::Parse(_))));
}

#[test]
fn test_non_string_values_are_rejected() {
	let (mut store, _temp) = create_test_store();
	fs::write(store.path(), r#"{"a": 1}"#).expect("Failed to write file");

	assert!(matches!(store.load(), Err(Error::Parse(_))));
}

#[test]
fn test_empty_file_loads_empty() {
	let (mut store, _temp) = create_test_store();
	fs::write(store.path(), "").expect("Failed to write file");

	store.load().expect("Failed to load");

	assert_eq!(store.get_value("a").expect("Failed to get"), None);
}

#[test]
fn test_external_write_requires_refresh() {
	let (mut store, _temp) = create_test_store();
	store.set_value("a", Some("1")).expect("Failed to set");
	store.save().expect("Failed to save");
	assert!(!store.needs_refresh());

	fs::write(store.path(), r#"{"a":"1","b":"external"}"#).expect("Failed to write file");

	assert!(store.needs_refresh());
	store.clear();
	store.load().expect("Failed to load");
	assert!(!store.needs_refresh());
	assert_eq!(store.get_value("b").expect("Failed to get").as_deref(), Some("external"));
}

#[test]
fn test_deleted_file_requires_refresh() {
	let (mut store, _temp) = create_test_store();
	store.set_value("a", Some("1")).expect("Failed to set");
	store.save().expect("Failed to save");

	fs::remove_file(store.path()).expect("Failed to remove file");

	assert!(store.needs_refresh());
}

#[test]
fn test_missing_directory_without_create_dirs() {
	let temp = TempDir::new().expect("Failed to create temp directory");
	let path = temp.path().join("missing").join("settings.json");
	let config = AdapterConfig { create_dirs: false, ..AdapterConfig::default() };
	let mut store = FsStore::with_config(&path, config).expect("Failed to create store");

	store.set_value("a", Some("1")).expect("Failed to set");
	let result = store.save();

	assert!(matches!(result, Err(Error::Io(_))));
	assert!(!path.exists());
}

#[test]
fn test_invalid_path() {
	let result = FsStore::new("/");
	assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

// vim: ts=4
