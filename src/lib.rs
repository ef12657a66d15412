//! fxpro - Terminal currency converter
//!
//! This library provides the core functionality for fxpro: user accounts,
//! live exchange rates with an offline fallback, conversion history and an
//! animated terminal dashboard with a rate trend chart.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths, settings and logging setup
//! - `error`: Custom error types
//! - `models`: Currencies, amounts, rates, trends and conversions
//! - `crypto`: Salted password hashing
//! - `storage`: SQLite database and the session file
//! - `sources`: Rate providers (exchangerate-api, frankfurter, mock table)
//! - `services`: Business logic layer
//! - `audit`: Audit logging of account events
//! - `display`: Terminal output formatting
//! - `cli`: Command handlers
//! - `tui`: Interactive interface
//!
//! # Example
//!
//! ```rust,ignore
//! use fxpro_cli::config::{paths::FxPaths, settings::Settings};
//! use fxpro_cli::services::RateService;
//!
//! let paths = FxPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let rates = RateService::from_settings(&settings)?;
//! let rate = rates.exchange_rate("USD".parse()?, "EUR".parse()?);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod sources;
pub mod storage;
pub mod tui;

pub use error::{FxError, FxResult};
