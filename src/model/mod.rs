// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkdown-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkdown and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A session holds at most one [`Document`]; previously opened documents
//! survive as lightweight [`RecentEntry`] records.

pub mod document;
pub mod ids;
pub mod recent;

pub use document::{Document, DocumentPatch};
pub use ids::{DocumentId, IdError};
pub use recent::RecentEntry;
