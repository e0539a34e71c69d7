//! JSON file store adapter
//!
//! Persists all raw settings of one store as a flat JSON object
//! (`{"name": "value", ...}`) in a single file.
//!
//! # Refresh detection
//!
//! The (modification time, length) stamp of the file is recorded on every
//! load and save. `needs_refresh` reports true when the current stamp differs,
//! i.e. when something else rewrote, created or deleted the file.
//!
//! # Writes
//!
//! Saves go to a temporary file in the same directory which is then renamed
//! over the settings file, so readers never see a partially written file.

#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use setcache::prelude::*;

/// File store configuration
#[derive(Debug, Clone)]
pub struct AdapterConfig {
	/// Write indented JSON
	pub pretty: bool,

	/// Create missing parent directories when opening the store
	pub create_dirs: bool,
}

impl Default for AdapterConfig {
	fn default() -> Self {
		Self { pretty: true, create_dirs: true }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
	modified: Option<SystemTime>,
	len: u64,
}

/// Stamp of the file, None if it does not exist
fn file_stamp(path: &Path) -> ScResult<Option<FileStamp>> {
	match fs::metadata(path) {
		Ok(meta) => Ok(Some(FileStamp { modified: meta.modified().ok(), len: meta.len() })),
		Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
		Err(err) => Err(err.into()),
	}
}

fn tmp_file_path(path: &Path) -> PathBuf {
	let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
	path.with_file_name(format!(".{}.tmp-{}", file_name, std::process::id()))
}

fn parse_entries(path: &Path, text: &str) -> ScResult<BTreeMap<String, String>> {
	if text.trim().is_empty() {
		return Ok(BTreeMap::new());
	}
	serde_json::from_str(text).map_err(|e| Error::Parse(format!("{}: {}", path.display(), e)))
}

#[derive(Debug)]
pub struct FsStore {
	path: Box<Path>,
	config: AdapterConfig,
	entries: BTreeMap<String, String>,
	/// Stamp recorded at the last load/save, None before the first load
	synced: Option<Option<FileStamp>>,
}

impl FsStore {
	pub fn new(path: impl Into<PathBuf>) -> ScResult<Self> {
		Self::with_config(path, AdapterConfig::default())
	}

	pub fn with_config(path: impl Into<PathBuf>, config: AdapterConfig) -> ScResult<Self> {
		let path: PathBuf = path.into();
		if path.file_name().is_none() {
			return Err(Error::InvalidArgument(format!("not a file path: {}", path.display())));
		}
		if config.create_dirs
			&& let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
		{
			fs::create_dir_all(parent)?;
		}
		Ok(Self { path: path.into_boxed_path(), config, entries: BTreeMap::new(), synced: None })
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn serialize(&self) -> ScResult<String> {
		Ok(if self.config.pretty {
			serde_json::to_string_pretty(&self.entries)?
		} else {
			serde_json::to_string(&self.entries)?
		})
	}
}

impl StoreAdapter for FsStore {
	fn save(&mut self) -> ScResult<()> {
		let data = self.serialize()?;
		let tmp_path = tmp_file_path(&self.path);

		let res = (|| {
			let mut file = File::create(&tmp_path)?;
			file.write_all(data.as_bytes())?;
			file.sync_all()?;
			fs::rename(&tmp_path, &self.path)?;
			Ok::<(), Error>(())
		})();
		if let Err(err) = res {
			info!("settings save failed, removing tmpfile: {:?}", &tmp_path);
			let _ = fs::remove_file(&tmp_path);
			return Err(err);
		}

		self.synced = Some(file_stamp(&self.path)?);
		info!("settings saved: {:?} ({} entries)", self.path, self.entries.len());
		Ok(())
	}

	fn load(&mut self) -> ScResult<()> {
		// Stamp first: a write racing with the read makes the next check reload again
		let stamp = file_stamp(&self.path)?;
		let text = match fs::read_to_string(&self.path) {
			Ok(text) => text,
			Err(err) if err.kind() == ErrorKind::NotFound => String::new(),
			Err(err) => return Err(err.into()),
		};

		self.entries = parse_entries(&self.path, &text)?;
		self.synced = Some(stamp);
		debug!("settings loaded: {:?} ({} entries)", self.path, self.entries.len());
		Ok(())
	}

	fn set_value(&mut self, name: &str, value: Option<&str>) -> ScResult<()> {
		match value {
			Some(value) => self.entries.insert(name.to_string(), value.to_string()),
			None => self.entries.remove(name),
		};
		Ok(())
	}

	fn get_value(&self, name: &str) -> ScResult<Option<String>> {
		Ok(self.entries.get(name).cloned())
	}

	fn clear(&mut self) {
		self.entries.clear();
	}

	fn needs_refresh(&self) -> bool {
		let Some(synced) = self.synced else {
			return true;
		};
		match file_stamp(&self.path) {
			Ok(current) => current != synced,
			Err(err) => {
				warn!("cannot stat settings file {:?}: {}", self.path, err);
				true
			}
		}
	}
}


// vim: ts=4
