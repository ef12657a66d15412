//! Append-only authentication log
//!
//! One JSON object per line. Writes are flushed before returning so a crash
//! never loses an accepted login.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{FxError, FxResult};

use super::entry::AuditEntry;

/// Writes and reads `audit.log`
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Append an entry and flush it
    pub fn log(&self, entry: &AuditEntry) -> FxResult<()> {
        if let Some(parent) = self.log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let line = serde_json::to_string(entry)
            .map_err(|e| FxError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| FxError::Io(format!("Failed to open audit log: {}", e)))?;
        writeln!(file, "{}", line)?;
        file.flush()?;

        Ok(())
    }

    /// Every entry, oldest first
    ///
    /// Lines that do not parse are skipped with a warning; a torn final line
    /// after a crash should not hide the rest of the log.
    pub fn read_all(&self) -> FxResult<Vec<AuditEntry>> {
        let file = match File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(FxError::Io(format!("Failed to open audit log: {}", e))),
        };

        let mut entries = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<AuditEntry>(&line) {
                Ok(entry) => entries.push(entry),
                Err(e) => tracing::warn!(line = index + 1, error = %e, "Skipping bad audit entry"),
            }
        }

        Ok(entries)
    }

    /// The last `count` entries for one user, oldest first
    pub fn read_recent(&self, username: &str, count: usize) -> FxResult<Vec<AuditEntry>> {
        let mut entries: Vec<AuditEntry> = self
            .read_all()?
            .into_iter()
            .filter(|e| e.username == username)
            .collect();
        let skip = entries.len().saturating_sub(count);
        entries.drain(..skip);
        Ok(entries)
    }
}
