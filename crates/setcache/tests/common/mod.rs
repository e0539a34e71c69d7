//! Common test utilities and helpers
//!
//! Shared setup used by the integration tests: logging and cache builders
//! backed by temporary storage.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use tempfile::TempDir;

use setcache::prelude::*;

/// Common test setup helper
pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::DEBUG)
		.try_init();
}

/// File backed settings in a fresh temporary directory.
///
/// The TempDir is returned alongside so cleanup happens when it is dropped.
pub fn create_file_settings() -> (DynSettings, TempDir) {
	setup_test_logging();
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let settings = SettingsBuilder::new()
		.file(temp_dir.path().join("settings.json"))
		.build()
		.expect("Failed to build settings");
	(settings, temp_dir)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowState {
	pub width: u32,
	pub height: u32,
	pub maximized: bool,
}

impl Default for WindowState {
	fn default() -> Self {
		Self { width: 1024, height: 768, maximized: false }
	}
}

// vim: ts=4
