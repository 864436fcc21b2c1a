// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkdown-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkdown and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence: the prefs key-value store and the recent-files registry
//! layered on top of it.

pub mod prefs;
pub mod recent_files;

pub use prefs::{default_prefs_dir, FilePrefs, MemoryPrefs, PrefsStore};
pub use recent_files::{RecentFilesRegistry, RECENT_FILES_CAPACITY, RECENT_FILES_KEY};
