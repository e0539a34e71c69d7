//! Change notification

use std::sync::Arc;

use parking_lot::RwLock;

/// Callback invoked with the name of a setting whose raw value changed
pub type ChangeListener = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Default)]
pub(crate) struct Listeners {
	inner: RwLock<Vec<ChangeListener>>,
}

impl Listeners {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	pub(crate) fn add(&self, listener: ChangeListener) {
		self.inner.write().push(listener);
	}

	pub(crate) fn notify(&self, name: &str) {
		// Snapshot first: a listener may subscribe another listener
		let listeners = self.inner.read().clone();
		for listener in &listeners {
			listener(name);
		}
	}

	pub(crate) fn len(&self) -> usize {
		self.inner.read().len()
	}
}

impl std::fmt::Debug for Listeners {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Listeners").field("count", &self.len()).finish()
	}
}

// vim: ts=4
