//! Typed settings cache over a raw string store
//!
//! # Locking
//!
//! - Mutations (`set_value`, `import`, `save`, reloads, `close`) run inside a
//!   single re-entrant exclusive region per cache instance.
//! - Reads (`get_value`, `has_value`, `has_different_value`) do not enter the
//!   exclusive region unless they trigger a refresh. They only borrow the
//!   store for the duration of each raw lookup, so a read may interleave
//!   between two steps of a mutation running on another thread. Reads are
//!   best-effort, writes are serialised.
//! - The typed value cache is a concurrent map and is populated by reads
//!   without the exclusive region.
//!
//! The store borrow is never held while user code (codecs, listeners) runs.

mod listener;
mod refresh;
mod region;
mod value;

use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use setcache_types::prelude::*;

use crate::config::CacheConfig;
pub use listener::ChangeListener;
use listener::Listeners;
use region::Region;
use value::{CachedValue, ValueCache};

/// Decode function turning a raw string into a typed value
pub type Decode<'a, T> = &'a dyn Fn(&str) -> ScResult<T>;

fn check_name(name: &str) -> ScResult<()> {
	if name.is_empty() {
		return Err(Error::InvalidArgument("setting name must not be empty".into()));
	}
	Ok(())
}

/// Typed, lazily refreshed cache over a [`StoreAdapter`]
pub struct SettingsCache<S: StoreAdapter> {
	store: RwLock<S>,
	region: Region,
	values: ValueCache,
	listeners: Listeners,
	config: CacheConfig,
	closed: AtomicBool,
}

impl<S: StoreAdapter> SettingsCache<S> {
	pub fn new(store: S) -> Self {
		Self::with_config(store, CacheConfig::default())
	}

	pub fn with_config(store: S, config: CacheConfig) -> Self {
		Self {
			store: RwLock::new(store),
			region: Region::new(),
			values: ValueCache::new(),
			listeners: Listeners::new(),
			config,
			closed: AtomicBool::new(false),
		}
	}

	pub fn config(&self) -> &CacheConfig {
		&self.config
	}

	/// Registers a listener called once for every real change made by `set_value`
	pub fn subscribe(&self, listener: impl Fn(&str) + Send + Sync + 'static) {
		self.listeners.add(std::sync::Arc::new(listener));
	}

	/// Runs `f` inside the exclusive region.
	///
	/// Operations called from `f` on the same cache are serialised with every
	/// other mutation as one batch.
	pub fn locked_action<R>(&self, f: impl FnOnce(&Self) -> R) -> R {
		self.region.exclusive(|| f(self))
	}

	/// Gives read access to the backing store.
	///
	/// `f` must not call back into the cache: the store stays borrowed while it runs.
	pub fn with_store<R>(&self, f: impl FnOnce(&S) -> R) -> R {
		f(&self.store.read())
	}

	/// Number of resolved entries in the typed value cache
	pub fn cached_count(&self) -> usize {
		self.values.len()
	}

	/// Persists the backing store
	pub fn save(&self) -> ScResult<()> {
		self.region.exclusive(|| self.store.write().save())
	}

	/// Writes raw values straight into the store and saves once.
	///
	/// Pairs without a value are skipped (the setting is left untouched, not
	/// removed). Imported names are evicted from the typed value cache; no
	/// change notification is sent. A failing write stops the import without
	/// saving.
	pub fn import<I, N, V>(&self, pairs: I) -> ScResult<()>
	where
		I: IntoIterator<Item = (N, Option<V>)>,
		N: AsRef<str>,
		V: AsRef<str>,
	{
		self.region.exclusive(|| {
			self.ensure_up_to_date()?;

			let mut store = self.store.write();
			let mut count = 0_usize;
			for (name, value) in pairs {
				let Some(value) = value else {
					continue;
				};
				let name = name.as_ref();
				check_name(name)?;
				store.set_value(name, Some(value.as_ref()))?;
				self.values.remove(name);
				count += 1;
			}
			store.save()?;

			info!("imported {} settings", count);
			Ok(())
		})
	}

	/// Current raw value of a setting
	pub fn raw_value(&self, name: &str) -> ScResult<Option<String>> {
		check_name(name)?;
		self.region.unguarded(|| {
			self.ensure_up_to_date()?;
			self.store.read().get_value(name)
		})
	}

	/// True if the store holds a value for the setting
	pub fn has_value(&self, name: &str) -> ScResult<bool> {
		Ok(self.raw_value(name)?.is_some())
	}

	/// True if the store holds a value for the setting and it differs from
	/// the encoded candidate. An unset setting never counts as different.
	pub fn has_different_value<T>(
		&self,
		name: &str,
		value: Option<&T>,
		encode: impl Fn(&T) -> ScResult<String>,
	) -> ScResult<bool> {
		let encoded = value.map(encode).transpose()?;

		let current = self.raw_value(name)?;
		Ok(current.is_some_and(|current| Some(current) != encoded))
	}

	/// Stores a typed value (`None` removes the setting).
	///
	/// The store is only written, and listeners only notified, when the
	/// encoded value differs from the current raw value. The typed value cache
	/// is updated either way. With `auto_save`, a failed save puts the previous
	/// raw value back and nothing is notified.
	pub fn set_value<T: Any + Send + Sync>(
		&self,
		name: &str,
		value: Option<T>,
		encode: impl Fn(&T) -> ScResult<String>,
	) -> ScResult<()> {
		check_name(name)?;
		let encoded = value.as_ref().map(encode).transpose()?;

		self.region.exclusive(|| {
			self.ensure_up_to_date()?;

			let changed = {
				let mut store = self.store.write();
				let previous = store.get_value(name)?;
				if previous == encoded {
					false
				} else {
					store.set_value(name, encoded.as_deref())?;
					if self.config.auto_save
						&& let Err(err) = store.save()
					{
						// Restore the raw value so a retry is seen as a change again
						if let Err(restore_err) = store.set_value(name, previous.as_deref()) {
							warn!("failed to restore setting '{}': {}", name, restore_err);
						}
						return Err(err);
					}
					true
				}
			};

			if changed {
				debug!("setting '{}' changed", name);
				self.listeners.notify(name);
			}

			match value {
				Some(value) => self.values.insert(name, value),
				None => self.values.insert_absent(name),
			}
			Ok(())
		})
	}

	/// Reads a typed value.
	///
	/// Cached values are returned without decoding. On a cache miss `decode`
	/// is required; it is not called when the store holds no value. The
	/// decoded value is only cached if no mutation ran meanwhile.
	pub fn get_value<T: Any + Clone + Send + Sync>(
		&self,
		name: &str,
		decode: Option<Decode<'_, T>>,
	) -> ScResult<Option<T>> {
		check_name(name)?;
		self.region.unguarded(|| {
			self.ensure_up_to_date()?;

			if let Some(cached) = self.values.lookup::<T>(name)? {
				trace!("setting cache hit: {}", name);
				return Ok(cached);
			}

			let decode = decode.ok_or_else(|| {
				Error::InvalidArgument(format!("the decode function for setting '{}' is missing", name))
			})?;

			let epoch = self.values.epoch();
			let raw = self.store.read().get_value(name)?;
			let Some(raw) = raw else {
				debug!("setting '{}' is not set", name);
				self.values.fill(name, CachedValue::Absent, epoch);
				return Ok(None);
			};

			let value = decode(&raw)?;
			if !self.values.fill(name, CachedValue::of(value.clone()), epoch) {
				trace!("setting '{}' changed while decoding, not cached", name);
			}
			Ok(Some(value))
		})
	}

	/// Reads a typed value, falling back to `default`.
	///
	/// Returns whether the setting was found along with the value.
	pub fn try_get_value<T: Any + Clone + Send + Sync>(
		&self,
		name: &str,
		default: T,
		decode: Option<Decode<'_, T>>,
	) -> ScResult<(bool, T)> {
		Ok(match self.get_value(name, decode)? {
			Some(value) => (true, value),
			None => (false, default),
		})
	}

	/// Releases the backing store's resources. Does not save. Idempotent.
	pub fn close(&self) -> ScResult<()> {
		if self.closed.swap(true, Ordering::AcqRel) {
			return Ok(());
		}
		self.region.exclusive(|| self.store.write().close())?;
		debug!("settings store closed");
		Ok(())
	}

	pub fn is_closed(&self) -> bool {
		self.closed.load(Ordering::Acquire)
	}
}

impl<S: StoreAdapter> Drop for SettingsCache<S> {
	fn drop(&mut self) {
		if let Err(err) = self.close() {
			warn!("failed to close settings store: {}", err);
		}
	}
}

impl<S: StoreAdapter> std::fmt::Debug for SettingsCache<S> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SettingsCache")
			.field("store", &*self.store.read())
			.field("cached", &self.values.len())
			.field("listeners", &self.listeners)
			.field("config", &self.config)
			.field("closed", &self.is_closed())
			.finish()
	}
}


// vim: ts=4
