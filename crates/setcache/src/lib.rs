//! setcache is a typed settings cache over pluggable string stores.
//!
//! # Features
//!
//! - Typed reads and writes through encode/decode functions
//!     - decoded values cached per setting name
//!     - type confusion between two readers of one name is reported
//! - Lazy refresh when the durable store changes underneath the cache
//! - Thread safe
//!     - writes serialised through one re-entrant exclusive region
//!     - reads lock-free apart from short store borrows
//! - Change notifications
//! - Stores
//!     - JSON file (`FsStore`)
//!     - in-memory with a shared medium (`MemoryStore`)
//!     - anything implementing `StoreAdapter`

// Re-export shared types and the adapter trait from setcache-types
pub use setcache_types::error;
pub use setcache_types::store_adapter;

// Core re-exports
pub use setcache_core::cache;
pub use setcache_core::codec;
pub use setcache_core::config;
pub use setcache_core::setting;
pub use setcache_core::{CacheConfig, Setting, SettingsCache};

// Adapter re-exports
pub use setcache_store_adapter_fs as fs;
pub use setcache_store_adapter_memory as memory;

// Local modules
pub mod builder;
pub mod prelude;

pub use crate::builder::{DynSettings, SettingsBuilder};

/// Installs a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing if a global subscriber is already set.
pub fn init_logging() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_target(false)
		.try_init();
}

// vim: ts=4
