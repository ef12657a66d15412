//! Audit logging for authentication events
//!
//! Registrations, logins (successful or not) and logouts are appended to a
//! JSONL file so a user can see who tried to access their account.
//!
//! # Example
//!
//! ```rust,ignore
//! use fxpro_cli::audit::{AuditEntry, AuditLogger, AuthEvent};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::new(AuthEvent::LoginSucceeded, "alice"))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, AuthEvent};
pub use logger::AuditLogger;
