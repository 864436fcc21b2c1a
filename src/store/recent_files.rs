// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkdown-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkdown and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::RecentEntry;

use super::prefs::PrefsStore;

/// Key the whole recent-files list is stored under, as one JSON array.
pub const RECENT_FILES_KEY: &str = "inkdown.recent-files";

/// Maximum number of entries kept, most-recently-used first.
pub const RECENT_FILES_CAPACITY: usize = 10;

/// Ordered, deduplicated, size-bounded list of previously opened documents.
///
/// The list is read and written as an atomic whole; `file_path` acts as the
/// unique key within it. All failures are absorbed: a missing, malformed or
/// unreadable record behaves like an empty list.
pub struct RecentFilesRegistry {
    store: Box<dyn PrefsStore>,
}

impl RecentFilesRegistry {
    pub fn new(store: Box<dyn PrefsStore>) -> Self {
        Self { store }
    }

    /// Returns the persisted list, most-recently-used first.
    pub fn list(&self) -> Vec<RecentEntry> {
        let Some(raw) = self.store.get_string(RECENT_FILES_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::debug!(error = %err, "malformed recent-files record, treating as empty");
                Vec::new()
            }
        }
    }

    /// Moves `entry` to the front of the list, evicting the oldest entry
    /// beyond capacity. Entries without a file path are never persisted.
    pub fn record(&self, entry: &RecentEntry) {
        let Some(path) = entry.file_path.as_deref() else {
            return;
        };

        let mut entries = self.list();
        entries.retain(|existing| existing.file_path.as_deref() != Some(path));
        entries.insert(0, entry.clone());
        entries.truncate(RECENT_FILES_CAPACITY);

        match serde_json::to_string(&entries) {
            Ok(raw) => self.store.set_string(RECENT_FILES_KEY, &raw),
            Err(err) => tracing::warn!(error = %err, "cannot serialize recent-files record"),
        }
    }

    /// Deletes the persisted list entirely.
    pub fn clear(&self) {
        self.store.remove(RECENT_FILES_KEY);
    }
}
