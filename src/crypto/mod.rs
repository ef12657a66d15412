//! Cryptographic functions for fxpro
//!
//! Provides the salted SHA-256 password hashing used by the credential store.

pub mod hashing;

pub use hashing::{generate_salt, hash_password, verify_password};

/// A password read from the user, wiped from memory on drop
pub type Password = zeroize::Zeroizing<String>;
