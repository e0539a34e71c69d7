//! Error type shared by the cache core and the store adapters

use std::fmt;

pub type ScResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// A required argument was missing or malformed (e.g. no decode function on a cache miss)
	InvalidArgument(String),

	/// A setting name was read with a different type than the one cached for it
	TypeMismatch {
		name: Box<str>,
		expected: &'static str,
		found: &'static str,
	},

	/// A value could not be encoded or decoded
	Parse(String),

	/// Backing store failure reported by an adapter
	Store(String),

	// externals
	Io(std::io::Error),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
			Error::TypeMismatch { name, expected, found } => write!(
				f,
				"incompatible type for setting '{}': expected {}, found {}",
				name, expected, found
			),
			Error::Parse(msg) => write!(f, "parse error: {}", msg),
			Error::Store(msg) => write!(f, "store error: {}", msg),
			Error::Io(e) => write!(f, "io error: {}", e),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(e) => Some(e),
			_ => None,
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Parse(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_type_mismatch_display() {
		let err = Error::TypeMismatch { name: "ui.theme".into(), expected: "i32", found: "bool" };
		assert_eq!(err.to_string(), "incompatible type for setting 'ui.theme': expected i32, found bool");
	}

	#[test]
	fn test_io_error_source() {
		let err = Error::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
		assert!(std::error::Error::source(&err).is_some());
		assert!(matches!(err, Error::Io(_)));
	}

	#[test]
	fn test_json_error_maps_to_parse() {
		let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
		assert!(matches!(Error::from(json_err), Error::Parse(_)));
	}
}

// vim: ts=4
