//! Shared types and the backing store adapter trait for setcache.
//!
//! This crate contains the foundational types that are shared between the
//! cache core and all store adapter implementations. Keeping them separate
//! lets adapter crates depend on the contract without pulling in the cache.

pub mod error;
pub mod prelude;
pub mod store_adapter;

// vim: ts=4
