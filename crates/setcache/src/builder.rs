//! Builder choosing a store and cache options at runtime

use std::path::PathBuf;

use setcache_core::{CacheConfig, SettingsCache};
use setcache_store_adapter_fs::{AdapterConfig, FsStore};
use setcache_store_adapter_memory::{MemoryMedium, MemoryStore};
use setcache_types::prelude::*;

/// Settings cache over a store selected at runtime
pub type DynSettings = SettingsCache<Box<dyn StoreAdapter>>;

type ChangeCallback = Box<dyn Fn(&str) + Send + Sync>;

enum Backend {
	Memory(MemoryMedium),
	File { path: PathBuf, config: AdapterConfig },
	Custom(Box<dyn StoreAdapter>),
}

pub struct SettingsBuilder {
	backend: Option<Backend>,
	config: CacheConfig,
	eager_load: bool,
	on_change: Vec<ChangeCallback>,
}

impl SettingsBuilder {
	pub fn new() -> Self {
		SettingsBuilder {
			backend: None,
			config: CacheConfig::default(),
			eager_load: false,
			on_change: Vec::new(),
		}
	}

	/// Keeps settings in memory on the given medium
	pub fn memory(mut self, medium: MemoryMedium) -> Self {
		self.backend = Some(Backend::Memory(medium));
		self
	}

	/// Persists settings to a JSON file
	pub fn file(self, path: impl Into<PathBuf>) -> Self {
		self.file_with_config(path, AdapterConfig::default())
	}

	pub fn file_with_config(mut self, path: impl Into<PathBuf>, config: AdapterConfig) -> Self {
		self.backend = Some(Backend::File { path: path.into(), config });
		self
	}

	/// Uses a custom store adapter
	pub fn store(mut self, store: impl StoreAdapter + 'static) -> Self {
		self.backend = Some(Backend::Custom(Box::new(store)));
		self
	}

	pub fn auto_save(mut self, auto_save: bool) -> Self {
		self.config.auto_save = auto_save;
		self
	}

	/// Loads the store while building, so that unreadable stores fail early
	pub fn eager_load(mut self, eager_load: bool) -> Self {
		self.eager_load = eager_load;
		self
	}

	pub fn on_change(mut self, listener: impl Fn(&str) + Send + Sync + 'static) -> Self {
		self.on_change.push(Box::new(listener));
		self
	}

	pub fn build(self) -> ScResult<DynSettings> {
		let store: Box<dyn StoreAdapter> = match self.backend {
			None => Box::new(MemoryStore::default()),
			Some(Backend::Memory(medium)) => Box::new(medium.open()),
			Some(Backend::File { path, config }) => {
				info!("settings file: {:?}", path);
				Box::new(FsStore::with_config(path, config)?)
			}
			Some(Backend::Custom(store)) => store,
		};

		let cache = SettingsCache::with_config(store, self.config);
		for listener in self.on_change {
			cache.subscribe(listener);
		}
		if self.eager_load {
			cache.ensure_up_to_date()?;
		}
		Ok(cache)
	}
}

impl Default for SettingsBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// vim: ts=4
