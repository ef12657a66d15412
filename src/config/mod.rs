//! Configuration module for fxpro
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence
//! - Logging setup

pub mod logging;
pub mod paths;
pub mod settings;

pub use paths::FxPaths;
pub use settings::Settings;
