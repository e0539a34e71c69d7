//! Refresh protocol
//!
//! The store is reloaded when it reports that its durable medium may have
//! changed. The first check runs without the exclusive region; it is repeated
//! inside the region so that callers racing on the same stale state reload
//! only once. The store stays exclusively borrowed across clear + load, so no
//! reader observes a half-loaded store.

use setcache_types::prelude::*;

use super::SettingsCache;

impl<S: StoreAdapter> SettingsCache<S> {
	/// Reloads the backing store if it reports external modification
	pub fn ensure_up_to_date(&self) -> ScResult<()> {
		if !self.store.read().needs_refresh() {
			return Ok(());
		}

		self.region.exclusive(|| {
			let mut store = self.store.write();
			if !store.needs_refresh() {
				debug!("settings already reloaded by another caller");
				return Ok(());
			}
			self.reload_locked(&mut store)
		})
	}

	/// Discards all raw and typed state and loads the store again,
	/// regardless of `needs_refresh`
	pub fn reload(&self) -> ScResult<()> {
		self.region.exclusive(|| {
			let mut store = self.store.write();
			self.reload_locked(&mut store)
		})
	}

	fn reload_locked(&self, store: &mut S) -> ScResult<()> {
		store.clear();
		self.values.clear();
		store.load()?;
		debug!("settings reloaded");
		Ok(())
	}
}

// vim: ts=4
