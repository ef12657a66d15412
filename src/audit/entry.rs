//! Audit entry data structures
//!
//! Defines the authentication events that are recorded and the entry format.
//! Entries never carry passwords, hashes or salts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authentication events that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthEvent {
    /// A new account was created
    Registered,
    /// Credentials were accepted
    LoginSucceeded,
    /// Credentials were rejected
    LoginFailed,
    /// The session was ended
    LoggedOut,
}

impl std::fmt::Display for AuthEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthEvent::Registered => write!(f, "REGISTERED"),
            AuthEvent::LoginSucceeded => write!(f, "LOGIN"),
            AuthEvent::LoginFailed => write!(f, "LOGIN FAILED"),
            AuthEvent::LoggedOut => write!(f, "LOGOUT"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the event occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub event: AuthEvent,

    /// Username as entered, even when no such user exists
    pub username: String,

    /// Extra context, e.g. why a login failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AuditEntry {
    pub fn new(event: AuthEvent, username: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            event,
            username: username.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Format the entry as a single human-readable line
    pub fn format_human_readable(&self) -> String {
        let mut line = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.event,
            self.username
        );
        if let Some(detail) = &self.detail {
            line.push_str(&format!(" ({})", detail));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_event_names() {
        let entry = AuditEntry::new(AuthEvent::LoginFailed, "alice");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"login_failed\""));
        assert!(!json.contains("detail"));
    }

    #[test]
    fn test_human_readable() {
        let entry = AuditEntry::new(AuthEvent::LoginFailed, "alice").with_detail("unknown user");
        let line = entry.format_human_readable();
        assert!(line.contains("LOGIN FAILED alice (unknown user)"));
    }
}
