//! Typed setting descriptors
//!
//! A [`Setting`] bundles a name, a default and a codec, so call sites read
//! `setting.get(&cache)` instead of repeating encode/decode closures.

use std::any::Any;
use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use setcache_types::prelude::*;

use crate::cache::{Decode, SettingsCache};
use crate::codec;

pub type EncodeFn<T> = fn(&T) -> ScResult<String>;
pub type DecodeFn<T> = fn(&str) -> ScResult<T>;

#[derive(Debug, Clone)]
pub struct Setting<T> {
	name: Box<str>,
	default: T,
	encode: EncodeFn<T>,
	decode: DecodeFn<T>,
}

impl<T: Any + Clone + Send + Sync> Setting<T> {
	pub fn new(name: impl Into<Box<str>>, default: T, encode: EncodeFn<T>, decode: DecodeFn<T>) -> Self {
		Self { name: name.into(), default, encode, decode }
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn default_value(&self) -> &T {
		&self.default
	}

	/// Current value, or the default if the setting is not set
	pub fn get<S: StoreAdapter>(&self, cache: &SettingsCache<S>) -> ScResult<T> {
		let decode: Decode<'_, T> = &self.decode;
		let (_, value) = cache.try_get_value(&self.name, self.default.clone(), Some(decode))?;
		Ok(value)
	}

	/// Stores a value; `None` removes the setting
	pub fn set<S: StoreAdapter>(&self, cache: &SettingsCache<S>, value: Option<T>) -> ScResult<()> {
		cache.set_value(&self.name, value, self.encode)
	}

	pub fn is_set<S: StoreAdapter>(&self, cache: &SettingsCache<S>) -> ScResult<bool> {
		cache.has_value(&self.name)
	}

	/// True if the setting is set to something other than `value`
	pub fn differs<S: StoreAdapter>(&self, cache: &SettingsCache<S>, value: &T) -> ScResult<bool> {
		cache.has_different_value(&self.name, Some(value), self.encode)
	}
}

impl<T> Setting<T>
where
	T: Any + Clone + Send + Sync + FromStr + Display,
	T::Err: Display,
{
	/// Setting stored through `Display` / `FromStr`
	pub fn parsed(name: impl Into<Box<str>>, default: T) -> Self {
		Self::new(name, default, codec::display::<T>, codec::parse::<T>)
	}
}

impl<T> Setting<T>
where
	T: Any + Clone + Send + Sync + Serialize + DeserializeOwned,
{
	/// Setting stored as a JSON document
	pub fn json(name: impl Into<Box<str>>, default: T) -> Self {
		Self::new(name, default, codec::to_json::<T>, codec::from_json::<T>)
	}
}

// vim: ts=4
