// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkdown-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkdown and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::document::Document;
use super::ids::DocumentId;

/// A content-free projection of a [`Document`] persisted in the recent list.
///
/// Content is deliberately not part of this record; it is re-read from disk
/// on the next open. Field names are fixed by the persisted format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentEntry {
    pub id: DocumentId,
    pub title: String,
    pub file_path: Option<PathBuf>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecentEntry {
    pub fn from_document(document: &Document) -> Self {
        Self {
            id: document.id().clone(),
            title: document.title().to_owned(),
            file_path: document.file_path().map(Path::to_path_buf),
            created_at: document.created_at(),
            updated_at: document.updated_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::super::document::{Document, DocumentPatch};
    use super::RecentEntry;

    #[test]
    fn projection_omits_content() {
        let document = Document::from_disk(
            PathBuf::from("/tmp/notes.md"),
            "notes",
            "# secret".to_owned(),
        );
        let entry = RecentEntry::from_document(&document);

        let raw = serde_json::to_string(&entry).expect("serialize");
        assert!(!raw.contains("secret"));
        assert!(!raw.contains("content"));
        assert!(raw.contains("\"filePath\""));
        assert!(raw.contains("\"createdAt\""));
    }

    #[test]
    fn timestamps_serialize_as_iso_8601() {
        let document = Document::new("Untitled");
        let entry = RecentEntry::from_document(&document);

        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&entry).expect("serialize"))
                .expect("parse");
        let created = value["createdAt"].as_str().expect("createdAt string");
        assert!(created.contains('T'), "expected ISO-8601 timestamp, got {created}");
    }

    #[test]
    fn round_trips_through_json() {
        let document = Document::new("Untitled").with(DocumentPatch {
            file_path: Some(Some(PathBuf::from("/tmp/x.md"))),
            ..DocumentPatch::default()
        });
        let entry = RecentEntry::from_document(&document);

        let raw = serde_json::to_string(&entry).expect("serialize");
        let back: RecentEntry = serde_json::from_str(&raw).expect("deserialize");
        assert_eq!(back, entry);
    }
}
