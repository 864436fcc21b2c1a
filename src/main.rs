// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkdown-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkdown and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Inkdown CLI entrypoint.
//!
//! Runs the interactive editor. An optional positional argument opens a file
//! on startup; `--log-file` enables tracing output (the terminal itself is
//! taken over by the UI, so logs never go to stderr).

use std::error::Error;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use inkdown::gateway::NativeFileGateway;
use inkdown::session::SessionController;
use inkdown::store::{default_prefs_dir, FilePrefs, RecentFilesRegistry};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<file.md>] [--prefs-dir <dir>] [--log-file <path>]\n\nOpens the given markdown file on startup, or an empty untitled document.\n\n--prefs-dir overrides where the recent-files list is stored\n(default: the platform config directory).\n\n--log-file appends tracing output to the given file; the filter is read\nfrom the INKDOWN_LOG environment variable (default `inkdown=info`)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    file: Option<PathBuf>,
    prefs_dir: Option<PathBuf>,
    log_file: Option<PathBuf>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--prefs-dir" => {
                if options.prefs_dir.is_some() {
                    return Err(());
                }
                let dir = args.next().ok_or(())?;
                options.prefs_dir = Some(PathBuf::from(dir));
            }
            "--log-file" => {
                if options.log_file.is_some() {
                    return Err(());
                }
                let path = args.next().ok_or(())?;
                options.log_file = Some(PathBuf::from(path));
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.file.is_some() {
                    return Err(());
                }
                options.file = Some(PathBuf::from(arg));
            }
        }
    }

    Ok(options)
}

fn init_tracing(log_file: &PathBuf) -> Result<(), Box<dyn Error>> {
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;
    let filter = EnvFilter::try_from_env("INKDOWN_LOG")
        .unwrap_or_else(|_| EnvFilter::new("inkdown=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "inkdown".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        if let Some(log_file) = &options.log_file {
            init_tracing(log_file)?;
        }

        let prefs_dir = options.prefs_dir.unwrap_or_else(default_prefs_dir);
        let registry = RecentFilesRegistry::new(Box::new(FilePrefs::new(prefs_dir)));
        let mut controller = SessionController::new(Box::new(NativeFileGateway), registry);

        if let Some(file) = options.file {
            if !controller.open_path(&file) {
                eprintln!("{program}: cannot open {}", file.display());
                std::process::exit(1);
            }
        }

        inkdown::tui::run(controller)
    })();

    if let Err(err) = result {
        eprintln!("inkdown: {err}");
        std::process::exit(1);
    }
}
