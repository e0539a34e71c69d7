//! Stock encode/decode functions
//!
//! Any `Fn(&T) -> ScResult<String>` / `Fn(&str) -> ScResult<T>` works with
//! the cache; these cover the common cases.

use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use setcache_types::prelude::*;

/// Decodes a value through its `FromStr` impl
pub fn parse<T>(raw: &str) -> ScResult<T>
where
	T: FromStr,
	T::Err: Display,
{
	raw.parse::<T>().map_err(|e| Error::Parse(format!("cannot parse '{}': {}", raw, e)))
}

/// Encodes a value through its `Display` impl
pub fn display<T: Display>(value: &T) -> ScResult<String> {
	Ok(value.to_string())
}

/// Decodes a JSON document
pub fn from_json<T: DeserializeOwned>(raw: &str) -> ScResult<T> {
	Ok(serde_json::from_str(raw)?)
}

/// Encodes a value as a compact JSON document
pub fn to_json<T: Serialize>(value: &T) -> ScResult<String> {
	Ok(serde_json::to_string(value)?)
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde::Deserialize;

	#[derive(Debug, PartialEq, Serialize, Deserialize)]
	struct Window {
		width: u32,
		maximized: bool,
	}

	#[test]
	fn test_parse_int() {
		assert_eq!(parse::<i32>("-17").unwrap(), -17);
	}

	#[test]
	fn test_parse_error() {
		let err = parse::<u8>("300").unwrap_err();
		assert!(matches!(err, Error::Parse(ref msg) if msg.contains("300")));
	}

	#[test]
	fn test_json() {
		let window = Window { width: 800, maximized: true };
		let raw = to_json(&window).unwrap();
		assert_eq!(raw, r#"{"width":800,"maximized":true}"#);
		assert_eq!(from_json::<Window>(&raw).unwrap(), window);
	}

	#[test]
	fn test_json_error() {
		assert!(matches!(from_json::<Window>("{\"width\":"), Err(Error::Parse(_))));
	}
}

// vim: ts=4
