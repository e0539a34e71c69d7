//! Exclusive and unguarded execution regions
//!
//! Every mutation of the backing store runs inside the exclusive region. The
//! lock is re-entrant so that a mutation may call other mutations on the same
//! cache (a change listener calling `set_value`, a `locked_action` batch).

use parking_lot::ReentrantMutex;

#[derive(Debug, Default)]
pub(crate) struct Region {
	lock: ReentrantMutex<()>,
}

impl Region {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	/// Runs `f` with the store-wide lock held
	pub(crate) fn exclusive<R>(&self, f: impl FnOnce() -> R) -> R {
		let _guard = self.lock.lock();
		f()
	}

	/// Runs `f` without taking the store-wide lock.
	///
	/// Reads may interleave with a mutation running on another thread.
	pub(crate) fn unguarded<R>(&self, f: impl FnOnce() -> R) -> R {
		f()
	}

	#[cfg(test)]
	pub(crate) fn is_held(&self) -> bool {
		self.lock.is_locked()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_exclusive_is_reentrant() {
		let region = Region::new();
		let value = region.exclusive(|| region.exclusive(|| 42));
		assert_eq!(value, 42);
		assert!(!region.is_held());
	}

	#[test]
	fn test_unguarded_does_not_lock() {
		let region = Region::new();
		assert!(!region.unguarded(|| region.is_held()));
		assert!(region.exclusive(|| region.is_held()));
	}
}

// vim: ts=4
