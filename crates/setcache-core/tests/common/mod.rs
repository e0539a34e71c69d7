//! Common test utilities and helpers
//!
//! `TestStore` is a minimal adapter whose "durable medium" is shared with the
//! test through an `Arc<Medium>`, so tests can modify it behind the cache's
//! back and count loads, saves and closes.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;

use setcache_types::prelude::*;

/// Common test setup helper
pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::DEBUG)
		.try_init();
}

#[derive(Debug)]
pub struct Medium {
	entries: Mutex<BTreeMap<String, String>>,
	stale: AtomicBool,
	fail_saves: AtomicBool,
	pub loads: AtomicUsize,
	pub saves: AtomicUsize,
	pub closes: AtomicUsize,
}

impl Medium {
	/// Modifies the durable content as another process would
	pub fn write_external(&self, name: &str, value: &str) {
		self.entries.lock().insert(name.to_string(), value.to_string());
		self.stale.store(true, Ordering::SeqCst);
	}

	pub fn mark_stale(&self) {
		self.stale.store(true, Ordering::SeqCst);
	}

	/// Makes every following save fail until reset
	pub fn fail_saves(&self, fail: bool) {
		self.fail_saves.store(fail, Ordering::SeqCst);
	}

	pub fn persisted(&self, name: &str) -> Option<String> {
		self.entries.lock().get(name).cloned()
	}

	pub fn loads(&self) -> usize {
		self.loads.load(Ordering::SeqCst)
	}

	pub fn saves(&self) -> usize {
		self.saves.load(Ordering::SeqCst)
	}
}

#[derive(Debug)]
pub struct TestStore {
	entries: BTreeMap<String, String>,
	medium: Arc<Medium>,
}

impl TestStore {
	pub fn new() -> (Self, Arc<Medium>) {
		let medium = Arc::new(Medium {
			entries: Mutex::new(BTreeMap::new()),
			stale: AtomicBool::new(true),
			fail_saves: AtomicBool::new(false),
			loads: AtomicUsize::new(0),
			saves: AtomicUsize::new(0),
			closes: AtomicUsize::new(0),
		});
		(Self { entries: BTreeMap::new(), medium: Arc::clone(&medium) }, medium)
	}
}

impl StoreAdapter for TestStore {
	fn save(&mut self) -> ScResult<()> {
		if self.medium.fail_saves.load(Ordering::SeqCst) {
			return Err(Error::Store("medium unavailable".into()));
		}
		*self.medium.entries.lock() = self.entries.clone();
		self.medium.saves.fetch_add(1, Ordering::SeqCst);
		Ok(())
	}

	fn load(&mut self) -> ScResult<()> {
		self.entries = self.medium.entries.lock().clone();
		self.medium.stale.store(false, Ordering::SeqCst);
		self.medium.loads.fetch_add(1, Ordering::SeqCst);
		Ok(())
	}

	fn set_value(&mut self, name: &str, value: Option<&str>) -> ScResult<()> {
		match value {
			Some(value) => self.entries.insert(name.to_string(), value.to_string()),
			None => self.entries.remove(name),
		};
		Ok(())
	}

	fn get_value(&self, name: &str) -> ScResult<Option<String>> {
		Ok(self.entries.get(name).cloned())
	}

	fn clear(&mut self) {
		self.entries.clear();
	}

	fn needs_refresh(&self) -> bool {
		self.medium.stale.load(Ordering::SeqCst)
	}

	fn close(&mut self) -> ScResult<()> {
		self.medium.closes.fetch_add(1, Ordering::SeqCst);
		Ok(())
	}
}

// vim: ts=4
