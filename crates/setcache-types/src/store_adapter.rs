//! Adapter that persists raw (string) setting values.
//!
//! The settings cache layers typed access, caching and refresh detection on
//! top of any type implementing [`StoreAdapter`]. Adapters only deal with raw
//! strings and never see typed values.
//!
//! Mutating methods take `&mut self`: the cache serialises them through its
//! exclusive region, so implementations do not need their own locking.
//! `get_value` and `needs_refresh` take `&self` and may be called from several
//! threads at once.

use std::fmt::Debug;

use crate::prelude::*;

pub trait StoreAdapter: Debug + Send + Sync {
	/// Persists the current in-memory raw state to the durable medium
	fn save(&mut self) -> ScResult<()>;

	/// Populates the raw state from the durable medium.
	///
	/// The cache always calls [`StoreAdapter::clear`] right before this.
	fn load(&mut self) -> ScResult<()>;

	/// Associates a raw value with a name. `None` removes the entry.
	fn set_value(&mut self, name: &str, value: Option<&str>) -> ScResult<()>;

	/// Looks up the raw value currently held for a name
	fn get_value(&self, name: &str) -> ScResult<Option<String>>;

	/// Discards all raw entries without touching the durable medium
	fn clear(&mut self);

	/// Returns true when the durable medium may have changed since the last
	/// load or save (and before the first load).
	fn needs_refresh(&self) -> bool;

	/// Releases resources held by the adapter. Called at most once.
	fn close(&mut self) -> ScResult<()> {
		Ok(())
	}
}

/// Boxed adapters, so a cache can be built over a store chosen at runtime
impl<S: StoreAdapter + ?Sized> StoreAdapter for Box<S> {
	fn save(&mut self) -> ScResult<()> {
		(**self).save()
	}

	fn load(&mut self) -> ScResult<()> {
		(**self).load()
	}

	fn set_value(&mut self, name: &str, value: Option<&str>) -> ScResult<()> {
		(**self).set_value(name, value)
	}

	fn get_value(&self, name: &str) -> ScResult<Option<String>> {
		(**self).get_value(name)
	}

	fn clear(&mut self) {
		(**self).clear();
	}

	fn needs_refresh(&self) -> bool {
		(**self).needs_refresh()
	}

	fn close(&mut self) -> ScResult<()> {
		(**self).close()
	}
}

// vim: ts=4
