// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkdown-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkdown and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::ids::DocumentId;

/// One open markdown document plus its dirty/save state.
///
/// `Document` is a value type: edits never mutate in place, they go through
/// [`Document::with`] and replace the whole value. `saved` is false whenever
/// `content` or `title` changed since the last successful save; `file_path`
/// stays `None` until the document has been written to disk at least once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    id: DocumentId,
    title: String,
    content: String,
    file_path: Option<PathBuf>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    saved: bool,
}

impl Document {
    /// Creates a fresh, pathless document with empty content.
    ///
    /// A new document counts as saved: there is nothing to lose yet.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: DocumentId::generate(),
            title: title.into(),
            content: String::new(),
            file_path: None,
            created_at: now,
            updated_at: now,
            saved: true,
        }
    }

    /// Creates a document backed by a file that was just read from disk.
    pub fn from_disk(path: PathBuf, title: impl Into<String>, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: DocumentId::generate(),
            title: title.into(),
            content,
            file_path: Some(path),
            created_at: now,
            updated_at: now,
            saved: true,
        }
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn saved(&self) -> bool {
        self.saved
    }

    /// Returns a copy with the patch's set fields replaced and all others
    /// retained. The id is never replaced.
    pub fn with(&self, patch: DocumentPatch) -> Self {
        Self {
            id: self.id.clone(),
            title: patch.title.unwrap_or_else(|| self.title.clone()),
            content: patch.content.unwrap_or_else(|| self.content.clone()),
            file_path: patch.file_path.unwrap_or_else(|| self.file_path.clone()),
            created_at: self.created_at,
            updated_at: patch.updated_at.unwrap_or(self.updated_at),
            saved: patch.saved.unwrap_or(self.saved),
        }
    }

    /// Name shown in the window title and seeded into save dialogs.
    ///
    /// For documents on disk this is the last non-empty path segment,
    /// splitting on both `/` and `\` so paths recorded on another platform
    /// still display something sensible. No extension is stripped. Pathless
    /// documents display as `<title>.md`.
    pub fn display_name(&self) -> String {
        match &self.file_path {
            Some(path) => {
                let raw = path.to_string_lossy();
                raw.split(['/', '\\'])
                    .rev()
                    .find(|segment| !segment.is_empty())
                    .unwrap_or(raw.as_ref())
                    .to_owned()
            }
            None => format!("{}.md", self.title),
        }
    }
}

/// Sparse field overrides for [`Document::with`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    /// `Some(None)` clears the path; `None` leaves it untouched.
    pub file_path: Option<Option<PathBuf>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub saved: Option<bool>,
}
