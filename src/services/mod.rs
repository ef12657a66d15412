//! Service layer for fxpro
//!
//! The service layer provides business logic on top of the storage layer
//! and the rate sources, handling validation, fallback and persistence.

pub mod auth;
pub mod conversion;
pub mod rates;
pub mod worker;

pub use auth::{AuthService, RegistrationStatus};
pub use conversion::{spawn, ConversionHandle, ConversionRequest, ConversionService};
pub use rates::RateService;
pub use worker::Job;
