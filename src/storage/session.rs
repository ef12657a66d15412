//! Persisted login session
//!
//! CLI invocations are separate processes, so a successful login is
//! remembered in `session.json` until it expires or the user logs out.

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::file_io::{read_json_opt, remove_if_exists, write_json_atomic};
use crate::error::{FxError, FxResult};

/// The logged-in user and the session's lifetime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Start a session lasting `ttl_hours`
    ///
    /// Fails when the expiry falls outside the representable date range.
    pub fn start(username: impl Into<String>, ttl_hours: u32) -> FxResult<Self> {
        let created_at = Utc::now();
        let expires_at = created_at
            .checked_add_signed(Duration::hours(i64::from(ttl_hours)))
            .ok_or_else(|| {
                FxError::Config(format!("session_ttl_hours {} is out of range", ttl_hours))
            })?;

        Ok(Self {
            username: username.into(),
            created_at,
            expires_at,
        })
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Reads and writes the session file
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Persist a session, replacing any previous one
    pub fn save(&self, session: &Session) -> FxResult<()> {
        write_json_atomic(&self.path, session)
    }

    /// Load the active session
    ///
    /// Expired or unreadable session files are removed and treated as no
    /// session at all.
    pub fn load(&self) -> FxResult<Option<Session>> {
        let session: Option<Session> = match read_json_opt(&self.path) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable session file");
                remove_if_exists(&self.path)?;
                return Ok(None);
            }
        };

        match session {
            Some(s) if s.is_expired() => {
                tracing::debug!(user = %s.username, "Session expired");
                remove_if_exists(&self.path)?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    /// Remove the session file
    pub fn clear(&self) -> FxResult<()> {
        remove_if_exists(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> SessionStore {
        SessionStore::new(dir.path().join("session.json"))
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);

        assert!(store.load().unwrap().is_none());

        let session = Session::start("alice", 12).unwrap();
        store.save(&session).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.username, "alice");
        assert_eq!(loaded.expires_at - loaded.created_at, Duration::hours(12));
    }

    #[test]
    fn test_start_rejects_unrepresentable_expiry() {
        let err = Session::start("alice", u32::MAX).unwrap_err();
        assert!(matches!(err, FxError::Config(_)));
    }

    #[test]
    fn test_expired_session_is_discarded() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);

        let mut session = Session::start("alice", 1).unwrap();
        session.expires_at = Utc::now() - Duration::minutes(1);
        store.save(&session).unwrap();

        assert!(store.load().unwrap().is_none());
        assert!(!temp_dir.path().join("session.json").exists());
    }

    #[test]
    fn test_corrupt_session_is_discarded() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        std::fs::write(temp_dir.path().join("session.json"), "garbage").unwrap();

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);

        store.save(&Session::start("alice", 1).unwrap()).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_is_expired_at() {
        let session = Session::start("alice", 2).unwrap();
        assert!(!session.is_expired_at(session.created_at + Duration::hours(1)));
        assert!(session.is_expired_at(session.created_at + Duration::hours(2)));
    }
}
