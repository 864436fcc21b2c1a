// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkdown-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkdown and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Inkdown — a terminal markdown editor with live preview and HTML export.
//!
//! One document open at a time; a recent-files list persisted in a small
//! preferences store; saving and exporting through native file dialogs.

pub mod gateway;
pub mod model;
pub mod render;
pub mod session;
pub mod store;
pub mod tui;

#[cfg(test)]
pub(crate) mod testutil;

#[cfg(test)]
mod tests {
    #[test]
    fn sanity() {
        assert_eq!(2 + 2, 4);
    }
}
