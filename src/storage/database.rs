//! SQLite connection and schema
//!
//! The `users` table keeps the column layout of existing credential
//! databases; `conversions` holds the per-user history.

use std::path::Path;

use rusqlite::Connection;

use super::history::HistoryRepository;
use super::users::UserRepository;
use crate::error::{FxError, FxResult};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    salt TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS conversions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    from_currency TEXT NOT NULL,
    to_currency TEXT NOT NULL,
    amount REAL NOT NULL,
    rate REAL NOT NULL,
    result REAL NOT NULL,
    source TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_conversions_user ON conversions(username, id);
";

/// Owner of the SQLite connection
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database file and apply the schema
    pub fn open(path: &Path) -> FxResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                FxError::Io(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let conn = Connection::open(path).map_err(|e| {
            FxError::Database(format!(
                "Failed to open database at {}: {}",
                path.display(),
                e
            ))
        })?;

        let db = Self { conn };
        db.migrate()?;
        tracing::debug!(path = %path.display(), "Database ready");
        Ok(db)
    }

    /// Create an in-memory database (for testing)
    pub fn open_in_memory() -> FxResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| FxError::Database(format!("Failed to create in-memory database: {}", e)))?;

        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> FxResult<()> {
        self.conn
            .execute_batch(SCHEMA)
            .map_err(|e| FxError::Database(format!("Failed to initialize schema: {}", e)))
    }

    /// Raw connection access
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Credential table
    pub fn users(&self) -> UserRepository<'_> {
        UserRepository::new(&self.conn)
    }

    /// Conversion history table
    pub fn history(&self) -> HistoryRepository<'_> {
        HistoryRepository::new(&self.conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_file_and_tables() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sub").join("auth.db");

        let db = Database::open(&path).unwrap();
        assert!(path.exists());

        let tables: Vec<String> = db
            .conn()
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert!(tables.contains(&"users".to_string()));
        assert!(tables.contains(&"conversions".to_string()));
    }

    #[test]
    fn test_reopen_keeps_data() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("auth.db");

        {
            let db = Database::open(&path).unwrap();
            db.users().insert("alice", "hash", "salt").unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert!(db.users().exists("alice").unwrap());
    }
}
