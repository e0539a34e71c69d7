//! In-memory store adapter
//!
//! The "durable medium" is a [`MemoryMedium`]: a shared map plus a generation
//! counter that is bumped on every save. Several [`MemoryStore`]s opened on
//! clones of one medium behave like several processes sharing one settings
//! file: a save through one of them makes the others report
//! `needs_refresh() == true`.

#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use setcache::prelude::*;

#[derive(Debug, Default)]
struct MediumState {
	entries: BTreeMap<String, String>,
	generation: u64,
}

#[derive(Debug, Default)]
struct MediumStats {
	loads: AtomicU64,
	saves: AtomicU64,
}

/// Shared durable medium for in-memory stores
#[derive(Debug, Clone, Default)]
pub struct MemoryMedium {
	state: Arc<RwLock<MediumState>>,
	stats: Arc<MediumStats>,
}

impl MemoryMedium {
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a medium pre-populated with raw values
	pub fn with_entries<I, K, V>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let medium = Self::new();
		medium.state.write().entries =
			entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
		medium
	}

	/// Opens a new store on this medium
	pub fn open(&self) -> MemoryStore {
		MemoryStore::new(self.clone())
	}

	/// Durable value of a setting, as the next load would see it
	pub fn persisted(&self, name: &str) -> Option<String> {
		self.state.read().entries.get(name).cloned()
	}

	/// Writes a durable value directly, as an external process would
	pub fn write_external(&self, name: &str, value: Option<&str>) {
		let mut state = self.state.write();
		match value {
			Some(value) => state.entries.insert(name.to_string(), value.to_string()),
			None => state.entries.remove(name),
		};
		state.generation += 1;
	}

	pub fn generation(&self) -> u64 {
		self.state.read().generation
	}

	pub fn loads(&self) -> u64 {
		self.stats.loads.load(Ordering::Relaxed)
	}

	pub fn saves(&self) -> u64 {
		self.stats.saves.load(Ordering::Relaxed)
	}
}

/// Store adapter keeping raw values in memory on top of a [`MemoryMedium`]
#[derive(Debug)]
pub struct MemoryStore {
	medium: MemoryMedium,
	entries: BTreeMap<String, String>,
	/// Medium generation seen at the last load/save, None before the first load
	synced_generation: Option<u64>,
}

impl MemoryStore {
	pub fn new(medium: MemoryMedium) -> Self {
		Self { medium, entries: BTreeMap::new(), synced_generation: None }
	}

	pub fn medium(&self) -> &MemoryMedium {
		&self.medium
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl Default for MemoryStore {
	fn default() -> Self {
		Self::new(MemoryMedium::new())
	}
}

impl StoreAdapter for MemoryStore {
	fn save(&mut self) -> ScResult<()> {
		let mut state = self.medium.state.write();
		state.entries.clone_from(&self.entries);
		state.generation += 1;
		self.synced_generation = Some(state.generation);
		self.medium.stats.saves.fetch_add(1, Ordering::Relaxed);
		debug!("memory store saved {} entries (generation {})", self.entries.len(), state.generation);
		Ok(())
	}

	fn load(&mut self) -> ScResult<()> {
		let state = self.medium.state.read();
		self.entries.clone_from(&state.entries);
		self.synced_generation = Some(state.generation);
		self.medium.stats.loads.fetch_add(1, Ordering::Relaxed);
		debug!("memory store loaded {} entries (generation {})", self.entries.len(), state.generation);
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
		self.synced_generation != Some(self.medium.generation())
	}
}


// vim: ts=4
