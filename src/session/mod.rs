// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkdown-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkdown and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Session state and the operations the presentation layer issues against it.
//!
//! The controller owns the single open [`Document`] and the cached recent
//! list, mediates every mutation, and broadcasts a bare "state changed"
//! notification after each one. Operations run to completion before the next
//! is issued; the presentation layer serializes user actions, so no locking
//! happens here.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::gateway::FileGateway;
use crate::model::{Document, DocumentPatch, RecentEntry};
use crate::store::RecentFilesRegistry;

mod export;

pub use export::wrap_html_document;

/// Extensions offered by the open picker and stripped from titles.
const OPEN_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

const MARKDOWN_SUFFIX: &str = ".md";
const HTML_SUFFIX: &str = ".html";

/// Handle returned by [`SessionController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Mediates all reads and writes of the single open document.
///
/// I/O failures never escape: they are logged at this boundary and surfaced
/// to callers as a `bool`/`Option` failure result. The unsaved-changes guard
/// before discarding a dirty document is the presentation layer's job; it
/// can ask via [`SessionController::has_unsaved_changes`].
pub struct SessionController {
    current: Option<Document>,
    recent_files: Vec<RecentEntry>,
    loading: bool,
    gateway: Box<dyn FileGateway>,
    registry: RecentFilesRegistry,
    subscribers: Vec<(SubscriberId, Box<dyn Fn()>)>,
    next_subscriber_id: u64,
}

impl SessionController {
    pub fn new(gateway: Box<dyn FileGateway>, registry: RecentFilesRegistry) -> Self {
        Self {
            current: None,
            recent_files: Vec::new(),
            loading: false,
            gateway,
            registry,
            subscribers: Vec::new(),
            next_subscriber_id: 0,
        }
    }

    pub fn current(&self) -> Option<&Document> {
        self.current.as_ref()
    }

    pub fn recent_files(&self) -> &[RecentEntry] {
        &self.recent_files
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.current.as_ref().is_some_and(|document| !document.saved())
    }

    /// Registers a state-changed callback. Notifications carry no payload;
    /// subscribers read the controller's fields directly and always fire
    /// strictly after the mutation they announce is applied.
    pub fn subscribe(&mut self, callback: Box<dyn Fn()>) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber_id);
        self.next_subscriber_id += 1;
        self.subscribers.push((id, callback));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|(existing, _)| *existing != id);
    }

    fn notify(&self) {
        for (_, callback) in &self.subscribers {
            callback();
        }
    }

    /// Refreshes the cached recent list from the registry.
    ///
    /// Notifies twice: once entering the loading state, once leaving it.
    pub fn load_recent_files(&mut self) {
        self.loading = true;
        self.notify();

        self.recent_files = self.registry.list();

        self.loading = false;
        self.notify();
    }

    /// Empties the registry and the cached recent list.
    pub fn clear_recent_files(&mut self) {
        self.registry.clear();
        self.recent_files.clear();
        self.notify();
    }

    /// Unconditionally replaces the current document with a fresh one.
    pub fn create_new(&mut self) {
        self.current = Some(Document::new("Untitled"));
        self.notify();
    }

    /// Lets the user pick a file to open. A cancelled picker or unreadable
    /// file leaves the current document unchanged.
    pub fn open_from_picker(&mut self) -> bool {
        let Some(path) = self.gateway.pick_open_path(OPEN_EXTENSIONS) else {
            tracing::debug!("open picker cancelled");
            self.notify();
            return false;
        };
        let opened = self.load_document(path);
        self.notify();
        opened
    }

    /// Opens an explicit path; used by "open recent". Fails when the path
    /// does not exist.
    pub fn open_path(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        let opened = if self.gateway.exists(&path) {
            self.load_document(path)
        } else {
            tracing::warn!(path = %path.display(), "cannot open file, path does not exist");
            false
        };
        self.notify();
        opened
    }

    fn load_document(&mut self, path: PathBuf) -> bool {
        let content = match self.gateway.read_text(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(error = %err, "cannot read file");
                return false;
            }
        };

        let title = title_from_path(&path);
        let document = Document::from_disk(path, title, content);
        self.registry.record(&RecentEntry::from_document(&document));
        self.current = Some(document);
        self.recent_files = self.registry.list();
        true
    }

    /// Replaces the content of the current document. Called on every
    /// keystroke; performs no I/O.
    pub fn update_content(&mut self, text: impl Into<String>) {
        self.patch_current(DocumentPatch {
            content: Some(text.into()),
            ..DocumentPatch::default()
        });
    }

    /// Replaces the title of the current document. Performs no I/O.
    pub fn update_title(&mut self, text: impl Into<String>) {
        self.patch_current(DocumentPatch {
            title: Some(text.into()),
            ..DocumentPatch::default()
        });
    }

    fn patch_current(&mut self, mut patch: DocumentPatch) {
        let Some(document) = self.current.as_ref() else {
            return;
        };
        patch.updated_at = Some(Utc::now());
        patch.saved = Some(false);
        self.current = Some(document.with(patch));
        self.notify();
    }

    /// Writes the current document to its path, delegating to
    /// [`SessionController::save_as`] when it has none yet.
    pub fn save(&mut self) -> bool {
        let Some(document) = self.current.as_ref() else {
            return false;
        };
        let Some(path) = document.file_path().map(Path::to_path_buf) else {
            return self.save_as().is_some();
        };

        match self.gateway.write_text(&path, document.content()) {
            Ok(()) => {
                self.mark_saved(None);
                self.notify();
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "save failed");
                self.notify();
                false
            }
        }
    }

    /// Asks for a target path (seeded with `<title>.md`, suffix appended if
    /// the chosen name lacks it) and writes the current document there.
    pub fn save_as(&mut self) -> Option<PathBuf> {
        let document = self.current.as_ref()?;
        let suggested = format!("{}.md", document.title());

        let Some(chosen) = self.gateway.pick_save_path(&suggested, &["md"]) else {
            tracing::debug!("save dialog cancelled");
            self.notify();
            return None;
        };
        let path = ensure_suffix(chosen, MARKDOWN_SUFFIX);

        match self.gateway.write_text(&path, document.content()) {
            Ok(()) => {
                self.mark_saved(Some(path.clone()));
                self.notify();
                Some(path)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "save-as failed");
                self.notify();
                None
            }
        }
    }

    fn mark_saved(&mut self, new_path: Option<PathBuf>) {
        let Some(document) = self.current.as_ref() else {
            return;
        };
        let mut patch = DocumentPatch {
            saved: Some(true),
            ..DocumentPatch::default()
        };
        if let Some(path) = new_path {
            patch.file_path = Some(Some(path));
        }
        let updated = document.with(patch);
        self.registry.record(&RecentEntry::from_document(&updated));
        self.current = Some(updated);
        self.recent_files = self.registry.list();
    }

    /// Writes `html_body` wrapped in the fixed export template to a path the
    /// user picks (seeded with `<title>.html`). The body goes in verbatim;
    /// no escaping or sanitization happens here. Does not mutate the session.
    pub fn export_html(&self, html_body: &str) -> Option<PathBuf> {
        let document = self.current.as_ref()?;
        let suggested = format!("{}.html", document.title());

        let Some(chosen) = self.gateway.pick_save_path(&suggested, &["html"]) else {
            tracing::debug!("export dialog cancelled");
            return None;
        };
        let path = ensure_suffix(chosen, HTML_SUFFIX);

        let html = wrap_html_document(document.title(), html_body);
        match self.gateway.write_text(&path, &html) {
            Ok(()) => Some(path),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "HTML export failed");
                None
            }
        }
    }

    /// Drops the current document. The caller is responsible for any
    /// unsaved-changes prompt, as with [`SessionController::create_new`].
    pub fn close(&mut self) {
        self.current = None;
        self.notify();
    }
}

/// Derives a document title from a filename by stripping one of the known
/// markdown extensions. Case-sensitive and anchored at the end of the name.
fn title_from_path(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Untitled".to_owned());

    for extension in OPEN_EXTENSIONS {
        let suffix = format!(".{extension}");
        if let Some(stripped) = name.strip_suffix(suffix.as_str()) {
            if !stripped.is_empty() {
                return stripped.to_owned();
            }
        }
    }
    name
}

fn ensure_suffix(path: PathBuf, suffix: &str) -> PathBuf {
    if path.to_string_lossy().ends_with(suffix) {
        return path;
    }
    let mut os = path.into_os_string();
    os.push(suffix);
    PathBuf::from(os)
}
