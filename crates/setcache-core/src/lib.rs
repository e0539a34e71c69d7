//! Typed settings cache.
//!
//! [`SettingsCache`] sits on top of any [`StoreAdapter`] (a store that only
//! persists strings) and gives callers typed reads and writes through
//! encode/decode functions. Decoded values are cached per name, and the
//! whole cache is dropped and the store reloaded whenever the store reports
//! that its durable medium changed underneath it.
//!
//! [`StoreAdapter`]: setcache_types::store_adapter::StoreAdapter

pub mod cache;
pub mod codec;
pub mod config;
pub mod setting;

pub use crate::cache::{ChangeListener, Decode, SettingsCache};
pub use crate::config::CacheConfig;
pub use crate::setting::Setting;

// vim: ts=4
