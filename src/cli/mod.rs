//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod auth;
pub mod config;
pub mod history;
pub mod rates;

pub use auth::{handle_auth_command, AuthCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use history::{handle_history_command, HistoryArgs};
pub use rates::{handle_rate_command, RateCommands};
