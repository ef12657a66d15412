//! Salted SHA-256 password hashing
//!
//! Each user gets 16 random bytes of salt, stored hex-encoded next to the
//! hash. The hash is SHA-256 over the password bytes followed by the salt
//! string, also stored as lowercase hex. This matches the layout of existing
//! `auth.db` files so old accounts keep working.

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Length of the raw salt in bytes
pub const SALT_LEN: usize = 16;

/// Generate a fresh random salt, hex-encoded
pub fn generate_salt() -> String {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    to_hex(&salt)
}

/// Hash a password with the given salt
///
/// # Examples
/// ```
/// use fxpro_cli::crypto::hash_password;
/// let hash = hash_password("hunter22", "00ff");
/// assert_eq!(hash.len(), 64);
/// ```
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    to_hex(&hasher.finalize())
}

/// Check a password against a stored salt and hash
pub fn verify_password(password: &str, salt: &str, stored_hash: &str) -> bool {
    let computed = hash_password(password, salt);
    constant_time_eq(computed.as_bytes(), stored_hash.as_bytes())
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

// No early exit on the first differing byte
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salt_format() {
        let salt = generate_salt();
        assert_eq!(salt.len(), SALT_LEN * 2);
        assert!(salt.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_salts_differ() {
        assert_ne!(generate_salt(), generate_salt());
    }

    #[test]
    fn test_known_vector() {
        // sha256("abc") with an empty salt
        assert_eq!(
            hash_password("abc", ""),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        // password and salt are concatenated before hashing
        assert_eq!(hash_password("a", "bc"), hash_password("abc", ""));
    }

    #[test]
    fn test_verify() {
        let salt = generate_salt();
        let hash = hash_password("secret1", &salt);

        assert!(verify_password("secret1", &salt, &hash));
        assert!(!verify_password("secret2", &salt, &hash));
        assert!(!verify_password("secret1", &generate_salt(), &hash));
        assert!(!verify_password("secret1", &salt, "deadbeef"));
    }

    #[test]
    fn test_same_password_different_salt_different_hash() {
        let h1 = hash_password("password", &generate_salt());
        let h2 = hash_password("password", &generate_salt());
        assert_ne!(h1, h2);
    }
}
