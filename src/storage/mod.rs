//! Storage layer for fxpro
//!
//! SQLite holds credentials and conversion history; the login session is a
//! small JSON file written atomically next to it.

pub mod database;
pub mod file_io;
pub mod history;
pub mod session;
pub mod users;

pub use database::Database;
pub use history::HistoryRepository;
pub use session::{Session, SessionStore};
pub use users::{StoredCredentials, UserRepository};

use crate::audit::AuditLogger;
use crate::config::paths::FxPaths;
use crate::error::FxError;

/// Main storage coordinator that provides access to all stores
pub struct Storage {
    paths: FxPaths,
    db: Database,
    pub sessions: SessionStore,
    pub audit: AuditLogger,
}

impl Storage {
    /// Open storage under the given paths, creating anything missing
    pub fn new(paths: FxPaths) -> Result<Self, FxError> {
        paths.ensure_directories()?;

        Ok(Self {
            db: Database::open(&paths.database_file())?,
            sessions: SessionStore::new(paths.session_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Storage with an in-memory database; files still go under `paths`
    pub fn in_memory(paths: FxPaths) -> Result<Self, FxError> {
        Ok(Self {
            db: Database::open_in_memory()?,
            sessions: SessionStore::new(paths.session_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &FxPaths {
        &self.paths
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn users(&self) -> UserRepository<'_> {
        self.db.users()
    }

    pub fn history(&self) -> HistoryRepository<'_> {
        self.db.history()
    }
}
