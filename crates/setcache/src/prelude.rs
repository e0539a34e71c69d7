pub use crate::builder::{DynSettings, SettingsBuilder};
pub use setcache_core::{CacheConfig, Setting, SettingsCache, codec};
pub use setcache_types::prelude::*;

// vim: ts=4
