//! Typed value cache
//!
//! Maps setting names to previously decoded values. Each entry carries an
//! explicit type tag so that reading a name with a different type than the
//! one it was cached with is reported instead of coerced.
//!
//! Readers fill the cache without the exclusive region. Every mutation bumps
//! an epoch; a fill only lands if the epoch it started under is still
//! current, so a decode that raced a write never replaces the newer entry.

use std::any::{Any, TypeId, type_name};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use setcache_types::prelude::*;

/// A resolved cache entry
#[derive(Clone)]
pub(crate) enum CachedValue {
	/// The store was consulted and holds no value for the name
	Absent,
	Present { type_id: TypeId, type_name: &'static str, value: Arc<dyn Any + Send + Sync> },
}

impl CachedValue {
	pub(crate) fn of<T: Any + Send + Sync>(value: T) -> Self {
		CachedValue::Present {
			type_id: TypeId::of::<T>(),
			type_name: type_name::<T>(),
			value: Arc::new(value),
		}
	}

	/// Extracts the cached value as `T`.
	///
	/// Returns `Ok(None)` for the absent marker.
	pub(crate) fn get<T: Any + Clone>(&self, name: &str) -> ScResult<Option<T>> {
		match self {
			CachedValue::Absent => Ok(None),
			CachedValue::Present { type_id, type_name: found, value } => {
				let mismatch = || Error::TypeMismatch {
					name: name.into(),
					expected: type_name::<T>(),
					found: *found,
				};
				if *type_id != TypeId::of::<T>() {
					return Err(mismatch());
				}
				value.downcast_ref::<T>().cloned().map(Some).ok_or_else(mismatch)
			}
		}
	}
}

impl std::fmt::Debug for CachedValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			CachedValue::Absent => write!(f, "Absent"),
			CachedValue::Present { type_name, .. } => write!(f, "Present<{}>", type_name),
		}
	}
}

/// Thread-safe name -> typed value map. Safe to use without the exclusive region.
#[derive(Debug, Default)]
pub(crate) struct ValueCache {
	entries: DashMap<Box<str>, CachedValue>,
	epoch: AtomicU64,
}

impl ValueCache {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	/// Looks up a resolved entry.
	///
	/// `Ok(None)`: unresolved, `Ok(Some(None))`: known absent,
	/// `Ok(Some(Some(v)))`: cached value.
	pub(crate) fn lookup<T: Any + Clone>(&self, name: &str) -> ScResult<Option<Option<T>>> {
		// Clone out of the shard so the shard lock is released before downcasting
		let Some(entry) = self.entries.get(name).map(|e| e.value().clone()) else {
			return Ok(None);
		};
		entry.get::<T>(name).map(Some)
	}

	/// Epoch to pass to [`ValueCache::fill`]. Read it before fetching the raw value.
	pub(crate) fn epoch(&self) -> u64 {
		self.epoch.load(Ordering::SeqCst)
	}

	fn bump(&self) {
		self.epoch.fetch_add(1, Ordering::SeqCst);
	}

	pub(crate) fn insert<T: Any + Send + Sync>(&self, name: &str, value: T) {
		self.bump();
		self.entries.insert(name.into(), CachedValue::of(value));
	}

	pub(crate) fn insert_absent(&self, name: &str) {
		self.bump();
		self.entries.insert(name.into(), CachedValue::Absent);
	}

	/// Caches a value resolved by a reader.
	///
	/// Dropped if any mutation happened since `epoch` was taken. Returns
	/// whether the entry was stored.
	pub(crate) fn fill(&self, name: &str, value: CachedValue, epoch: u64) -> bool {
		// The shard stays locked between the epoch check and the insert, and
		// writers bump before they lock, so a stale fill either loses the check
		// or is overwritten by the writer
		let entry = self.entries.entry(name.into());
		if self.epoch() != epoch {
			return false;
		}
		match entry {
			Entry::Occupied(mut occupied) => {
				occupied.insert(value);
			}
			Entry::Vacant(vacant) => {
				vacant.insert(value);
			}
		}
		true
	}

	pub(crate) fn remove(&self, name: &str) {
		self.bump();
		self.entries.remove(name);
	}

	pub(crate) fn clear(&self) {
		self.bump();
		self.entries.clear();
	}

	pub(crate) fn len(&self) -> usize {
		self.entries.len()
	}
}


// vim: ts=4
