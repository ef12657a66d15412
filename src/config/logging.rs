//! Diagnostic logging setup
//!
//! CLI commands log to stderr. The TUI owns the terminal, so it logs to a
//! file instead and falls back to no output at all when the file cannot be
//! opened.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Where log lines should go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error, for one-shot CLI commands
    Stderr,
    /// The log file under the data directory, for the TUI
    File,
}

fn env_filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "fxpro_cli=debug" } else { "warn" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global tracing subscriber
///
/// Safe to call more than once; later calls are ignored.
pub fn init(target: LogTarget, log_file: &Path, verbose: bool) {
    let filter = env_filter(verbose);

    let result = match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init(),
        LogTarget::File => {
            if let Some(parent) = log_file.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            match OpenOptions::new().create(true).append(true).open(log_file) {
                Ok(file) => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                    .try_init(),
                // Drawing over the alternate screen is worse than losing logs
                Err(_) => tracing_subscriber::registry().with(filter).try_init(),
            }
        }
    };

    if result.is_ok() && target == LogTarget::File {
        tracing::info!(path = %log_file.display(), "Logging initialized");
    }
}
