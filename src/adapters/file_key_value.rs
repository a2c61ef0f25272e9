//! File-backed key-value preference store.
//!
//! Persists preferences as a flat JSON map in `~/.humint/preferences.json`.
//! Reads degrade to empty on any failure and writes report best-effort
//! success, so an unwritable disk never surfaces to the conversation.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use crate::traits::KeyValueStore;

/// The preferences directory name.
const PREFERENCES_DIR: &str = ".humint";

/// The preferences file name.
const PREFERENCES_FILE: &str = "preferences.json";

/// Key-value store persisting a JSON map to a single file.
#[derive(Debug)]
pub struct FileKeyValueStore {
    /// Path to the preferences file.
    path: PathBuf,
    /// In-memory view of the map, kept in sync with the file.
    entries: Mutex<HashMap<String, String>>,
}

impl FileKeyValueStore {
    /// Create a store at the default location under the home directory.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        let path = home.join(PREFERENCES_DIR).join(PREFERENCES_FILE);
        Some(Self::at_path(path))
    }

    /// Create a store backed by an explicit file path.
    pub fn at_path(path: PathBuf) -> Self {
        let entries = Self::load_entries(&path);
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// Get the path to the preferences file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load the map from disk, degrading to empty on any failure.
    fn load_entries(path: &PathBuf) -> HashMap<String, String> {
        if !path.exists() {
            return HashMap::new();
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(_) => return HashMap::new(),
        };

        let reader = BufReader::new(file);
        serde_json::from_reader(reader).unwrap_or_default()
    }

    /// Write the map to disk. Returns `true` on success.
    fn persist(&self, entries: &HashMap<String, String>) -> bool {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() && fs::create_dir_all(parent).is_err() {
                return false;
            }
        }

        let file = match File::create(&self.path) {
            Ok(f) => f,
            Err(_) => return false,
        };

        let mut writer = BufWriter::new(file);
        if serde_json::to_writer_pretty(&mut writer, entries).is_err() {
            return false;
        }
        writer.flush().is_ok()
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }
}
