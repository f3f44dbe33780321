//! Slice-per-key persistence for store state.
//!
//! Each slice of application state (tasks, lists, tags, sticky notes and
//! the persisted UI flags) is written to its own JSON file under the data
//! directory, so a corrupt or missing slice only ever costs that slice.
//! Reads that fail fall back to the caller's default; writes that fail are
//! logged and swallowed. Neither ever aborts the mutation that triggered
//! them.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Storage key for the task slice.
pub const KEY_TASKS: &str = "tasks";
/// Storage key for the list slice.
pub const KEY_LISTS: &str = "lists";
/// Storage key for the tag slice.
pub const KEY_TAGS: &str = "tags";
/// Storage key for the sticky note slice.
pub const KEY_STICKY_NOTES: &str = "sticky_notes";
/// Storage key for the persisted dark-mode flag.
pub const KEY_DARK_MODE: &str = "dark_mode";
/// Storage key for the persisted sidebar flag.
pub const KEY_SIDEBAR_OPEN: &str = "sidebar_open";

/// File-backed key-value storage rooted at a data directory.
///
/// One JSON file per key, named `<key>.json`.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    /// Open storage rooted at `dir`, creating the directory if needed.
    pub fn open(dir: &Path) -> std::io::Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Storage {
            dir: dir.to_path_buf(),
        })
    }

    /// Directory this storage writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Read and decode a slice.
    ///
    /// Absence and corruption both yield `None`; corruption is logged so
    /// the silent fallback to seed data leaves a trace.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.key_path(key);
        if !path.exists() {
            return None;
        }
        let mut buf = String::new();
        match File::open(&path).and_then(|mut f| f.read_to_string(&mut buf)) {
            Ok(_) => match serde_json::from_str(&buf) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("discarding corrupt slice '{key}': {e}");
                    None
                }
            },
            Err(e) => {
                warn!("failed to read slice '{key}': {e}");
                None
            }
        }
    }

    /// Encode and write a slice using an atomic write (temp file + rename).
    ///
    /// Failures are logged and swallowed; persistence is fire-and-forget.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_write(key, value) {
            warn!("failed to persist slice '{key}': {e}");
        }
    }

    fn try_write<T: Serialize>(&self, key: &str, value: &T) -> std::io::Result<()> {
        let path = self.key_path(key);
        let tmp = path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(value)?;
        let mut f = File::create(&tmp)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let value: Option<Vec<String>> = storage.read("nothing_here");
        assert!(value.is_none());
    }

    #[test]
    fn test_write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        storage.write(KEY_DARK_MODE, &true);
        assert_eq!(storage.read::<bool>(KEY_DARK_MODE), Some(true));
    }

    #[test]
    fn test_corrupt_slice_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        fs::write(dir.path().join("tasks.json"), "{not json").unwrap();
        let value: Option<Vec<crate::task::Task>> = storage.read(KEY_TASKS);
        assert!(value.is_none());
    }

    #[test]
    fn test_slices_are_independent_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        storage.write(KEY_DARK_MODE, &true);
        storage.write(KEY_SIDEBAR_OPEN, &false);
        assert!(dir.path().join("dark_mode.json").exists());
        assert!(dir.path().join("sidebar_open.json").exists());
    }
}
