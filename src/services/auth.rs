//! Authentication service
//!
//! Registration, login and the persisted session. Passwords are only ever
//! held as borrowed `&str`; callers own the zeroizing buffers.

use crate::audit::{AuditEntry, AuthEvent};
use crate::config::settings::Settings;
use crate::crypto::{generate_salt, hash_password, verify_password};
use crate::error::{FxError, FxResult};
use crate::storage::{Session, Storage};

/// Outcome of a registration attempt that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStatus {
    Success,
    UserAlreadyExists,
}

/// Service for user accounts and sessions
pub struct AuthService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> AuthService<'a> {
    /// Create a new auth service
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Create an account
    ///
    /// Bad input is a [`FxError::Validation`]; a taken username is reported
    /// through the status rather than as an error.
    pub fn register(
        &self,
        username: &str,
        password: &str,
        confirm: &str,
    ) -> FxResult<RegistrationStatus> {
        let username = username.trim();
        // Passwords are stored as typed; only blank ones are rejected
        if username.is_empty() || password.trim().is_empty() || confirm.trim().is_empty() {
            return Err(FxError::Validation("Please fill in all fields".into()));
        }

        if password.chars().count() < self.settings.min_password_length {
            return Err(FxError::Validation(format!(
                "Password must be at least {} characters",
                self.settings.min_password_length
            )));
        }

        if password != confirm {
            return Err(FxError::Validation("Passwords do not match".into()));
        }

        let salt = generate_salt();
        let hash = hash_password(password, &salt);

        match self.storage.users().insert(username, &hash, &salt) {
            Ok(id) => {
                tracing::info!(user = %username, id, "Registered new user");
                self.audit(AuditEntry::new(AuthEvent::Registered, username));
                Ok(RegistrationStatus::Success)
            }
            Err(e) if e.is_duplicate() => {
                tracing::info!(user = %username, "Registration rejected, username taken");
                Ok(RegistrationStatus::UserAlreadyExists)
            }
            Err(e) => Err(e),
        }
    }

    /// Check credentials and start a session on success
    ///
    /// Unknown users and wrong passwords both yield `false`. So do database
    /// failures, which are logged.
    pub fn login(&self, username: &str, password: &str) -> FxResult<bool> {
        let username = username.trim();
        if username.is_empty() || password.trim().is_empty() {
            return Err(FxError::Validation("Please fill in all fields".into()));
        }

        let credentials = match self.storage.users().get_credentials(username) {
            Ok(credentials) => credentials,
            Err(e) => {
                tracing::error!(user = %username, error = %e, "Credential lookup failed");
                return Ok(false);
            }
        };

        let accepted = credentials
            .map(|c| verify_password(password, &c.salt, &c.password_hash))
            .unwrap_or(false);

        if !accepted {
            tracing::info!(user = %username, "Login rejected");
            self.audit(
                AuditEntry::new(AuthEvent::LoginFailed, username).with_detail("invalid credentials"),
            );
            return Ok(false);
        }

        self.storage
            .sessions
            .save(&Session::start(username, self.settings.session_ttl_hours)?)?;

        tracing::info!(user = %username, "Login succeeded");
        self.audit(AuditEntry::new(AuthEvent::LoginSucceeded, username));
        Ok(true)
    }

    /// End the current session, returning who was logged in
    pub fn logout(&self) -> FxResult<Option<String>> {
        let session = self.storage.sessions.load()?;
        self.storage.sessions.clear()?;

        if let Some(session) = &session {
            tracing::info!(user = %session.username, "Logged out");
            self.audit(AuditEntry::new(AuthEvent::LoggedOut, &session.username));
        }

        Ok(session.map(|s| s.username))
    }

    /// Username of the active session, if any
    pub fn current_user(&self) -> FxResult<Option<String>> {
        Ok(self.storage.sessions.load()?.map(|s| s.username))
    }

    /// Username of the active session, or a session error
    pub fn require_user(&self) -> FxResult<String> {
        self.current_user()?
            .ok_or_else(|| FxError::Session("Please login first: fxpro login <username>".into()))
    }

    /// Recent sign-in events for the logged-in user, newest last
    pub fn recent_activity(&self, limit: usize) -> FxResult<Vec<AuditEntry>> {
        let user = self.require_user()?;
        self.storage.audit.read_recent(&user, limit)
    }

    // A broken audit log must not lock anyone out
    fn audit(&self, entry: AuditEntry) {
        if let Err(e) = self.storage.audit.log(&entry) {
            tracing::warn!(error = %e, "Failed to write audit entry");
        }
    }
}
