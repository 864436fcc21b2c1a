// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkdown-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkdown and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! File access behind a seam.
//!
//! The session controller talks to the filesystem and to the interactive
//! pickers only through [`FileGateway`], so tests can script both.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Native file read/write plus interactive open/save dialogs.
///
/// Picker methods return `None` when the user cancels; that is a normal
/// negative result, not an error. Dialogs block the calling thread until
/// dismissed.
pub trait FileGateway {
    fn pick_open_path(&self, extensions: &[&str]) -> Option<PathBuf>;
    fn pick_save_path(&self, suggested_name: &str, extensions: &[&str]) -> Option<PathBuf>;
    fn read_text(&self, path: &Path) -> Result<String, GatewayError>;
    fn write_text(&self, path: &Path, text: &str) -> Result<(), GatewayError>;
    fn exists(&self, path: &Path) -> bool;
}

#[derive(Debug)]
pub enum GatewayError {
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
        }
    }
}

impl std::error::Error for GatewayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl GatewayError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }
}

/// [`FileGateway`] backed by `std::fs` and the platform file dialogs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFileGateway;

impl FileGateway for NativeFileGateway {
    fn pick_open_path(&self, extensions: &[&str]) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .add_filter("Markdown", extensions)
            .pick_file()
    }

    fn pick_save_path(&self, suggested_name: &str, extensions: &[&str]) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .add_filter("Markdown", extensions)
            .set_file_name(suggested_name)
            .save_file()
    }

    fn read_text(&self, path: &Path) -> Result<String, GatewayError> {
        fs::read_to_string(path).map_err(|source| GatewayError::io(path, source))
    }

    fn write_text(&self, path: &Path, text: &str) -> Result<(), GatewayError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| GatewayError::io(parent, source))?;
        }
        fs::write(path, text).map_err(|source| GatewayError::io(path, source))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
