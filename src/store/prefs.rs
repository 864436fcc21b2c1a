// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkdown-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkdown and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

const PREFS_FILENAME: &str = "inkdown-prefs.json";

/// Process-independent string key-value store.
///
/// This is a convenience store, not a system of record: reads degrade to
/// "absent" and writes are absorbed on failure. Callers that need to know
/// whether a value survived must read it back.
pub trait PrefsStore {
    fn get_string(&self, key: &str) -> Option<String>;
    fn set_string(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// File-backed [`PrefsStore`]: a single JSON object of string keys/values.
///
/// Every operation reads and rewrites the whole file; there is no in-memory
/// cache and no cross-process locking. Single-writer usage is assumed.
#[derive(Debug, Clone)]
pub struct FilePrefs {
    path: PathBuf,
}

impl FilePrefs {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(PREFS_FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> BTreeMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "cannot read prefs file");
                return BTreeMap::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(err) => {
                tracing::debug!(path = %self.path.display(), error = %err, "malformed prefs file, treating as empty");
                BTreeMap::new()
            }
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) {
        let raw = match serde_json::to_string_pretty(map) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(error = %err, "cannot serialize prefs");
                return;
            }
        };
        if let Err(err) = write_atomic(&self.path, raw.as_bytes()) {
            tracing::warn!(path = %self.path.display(), error = %err, "cannot write prefs file");
        }
    }
}

impl PrefsStore for FilePrefs {
    fn get_string(&self, key: &str) -> Option<String> {
        self.read_map().remove(key)
    }

    fn set_string(&self, key: &str, value: &str) {
        let mut map = self.read_map();
        map.insert(key.to_owned(), value.to_owned());
        self.write_map(&map);
    }

    fn remove(&self, key: &str) {
        let mut map = self.read_map();
        if map.remove(key).is_some() {
            self.write_map(&map);
        }
    }
}

/// In-memory [`PrefsStore`] used by tests and as a fallback when no prefs
/// directory is usable.
#[derive(Debug, Default)]
pub struct MemoryPrefs {
    entries: Mutex<BTreeMap<String, String>>,
}

impl PrefsStore for MemoryPrefs {
    fn get_string(&self, key: &str) -> Option<String> {
        self.entries.lock().expect("prefs lock poisoned").get(key).cloned()
    }

    fn set_string(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .expect("prefs lock poisoned")
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().expect("prefs lock poisoned").remove(key);
    }
}

/// Default prefs directory: the platform config dir, or home, or the temp
/// dir when neither resolves.
pub fn default_prefs_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("inkdown")
}

/// Writes via a temp file in the same directory plus an atomic rename, so a
/// crash mid-write never leaves a truncated prefs file behind.
fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "prefs".to_owned());
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(".inkdown.tmp.{file_name}.{nanos}"));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)?;
    file.write_all(contents)?;
    drop(file);

    match fs::rename(&tmp_path, path) {
        Ok(()) => Ok(()),
        Err(err) => {
            let _ = fs::remove_file(&tmp_path);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testutil::TempDir;

    use super::{FilePrefs, MemoryPrefs, PrefsStore, PREFS_FILENAME};

    #[test]
    fn file_prefs_round_trips_values() {
        let tmp = TempDir::new("prefs");
        let prefs = FilePrefs::new(tmp.path());

        assert_eq!(prefs.get_string("greeting"), None);
        prefs.set_string("greeting", "hello");
        assert_eq!(prefs.get_string("greeting"), Some("hello".to_owned()));

        prefs.remove("greeting");
        assert_eq!(prefs.get_string("greeting"), None);
    }

    #[test]
    fn file_prefs_survives_reopen() {
        let tmp = TempDir::new("prefs-reopen");
        FilePrefs::new(tmp.path()).set_string("key", "value");

        let reopened = FilePrefs::new(tmp.path());
        assert_eq!(reopened.get_string("key"), Some("value".to_owned()));
    }

    #[test]
    fn malformed_prefs_file_reads_as_empty() {
        let tmp = TempDir::new("prefs-malformed");
        let path = tmp.path().join(PREFS_FILENAME);
        std::fs::write(&path, "{ not json").unwrap();

        let prefs = FilePrefs::new(tmp.path());
        assert_eq!(prefs.get_string("anything"), None);

        // A write replaces the malformed file with a valid one.
        prefs.set_string("key", "value");
        assert_eq!(prefs.get_string("key"), Some("value".to_owned()));
    }

    #[test]
    fn set_keeps_unrelated_keys() {
        let tmp = TempDir::new("prefs-keys");
        let prefs = FilePrefs::new(tmp.path());
        prefs.set_string("a", "1");
        prefs.set_string("b", "2");
        prefs.remove("a");
        assert_eq!(prefs.get_string("b"), Some("2".to_owned()));
    }

    #[test]
    fn memory_prefs_round_trips_values() {
        let prefs = MemoryPrefs::default();
        prefs.set_string("key", "value");
        assert_eq!(prefs.get_string("key"), Some("value".to_owned()));
        prefs.remove("key");
        assert_eq!(prefs.get_string("key"), None);
    }
}
