//! Settings cache configuration

/// Settings cache configuration options
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
	/// Persist the store after every changed `set_value` instead of waiting
	/// for an explicit `save()`
	pub auto_save: bool,
}

// vim: ts=4
