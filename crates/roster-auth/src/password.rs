//! Password hashing and verification

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::PasswordError;

/// Maximum password length fed into the hash, in bytes.
/// Longer inputs are truncated deterministically instead of erroring.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// A syntactically valid hash that no password verifies against.
/// Login verifies against this when the email is unknown so both
/// failure paths cost a full hash computation.
pub const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$cm9zdGVyX2xvZ2luX2R1bW15X3NhbHQ$CgsMDQ4PEBESExQVFhcYGRobHB0eHyAhIiMkJSYnKCk";

/// Bound the password to MAX_PASSWORD_BYTES at a char boundary
fn bounded(password: &str) -> &[u8] {
    if password.len() <= MAX_PASSWORD_BYTES {
        return password.as_bytes();
    }
    let mut end = MAX_PASSWORD_BYTES;
    while !password.is_char_boundary(end) {
        end -= 1;
    }
    &password.as_bytes()[..end]
}

/// Hash a password with argon2id and a fresh random salt
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(bounded(password), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Verify a password against a stored hash
///
/// Fails closed: a malformed stored hash verifies as `false` rather
/// than propagating an error.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(bounded(password), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Str0ng!Pass").unwrap();
        assert!(verify_password("Str0ng!Pass", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("Str0ng!Pass").unwrap();
        let b = hash_password("Str0ng!Pass").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("Str0ng!Pass", &b));
    }

    #[test]
    fn test_malformed_hash_fails_closed() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
    }

    #[test]
    fn test_dummy_hash_rejects_everything() {
        assert!(!verify_password("", DUMMY_PASSWORD_HASH));
        assert!(!verify_password("admin", DUMMY_PASSWORD_HASH));
    }

    #[test]
    fn test_oversized_passwords_truncate_deterministically() {
        let long = "a".repeat(200);
        let hash = hash_password(&long).unwrap();
        // Same 72-byte prefix verifies, regardless of tail
        assert!(verify_password(&"a".repeat(MAX_PASSWORD_BYTES), &hash));
        assert!(verify_password(&"a".repeat(300), &hash));
        assert!(!verify_password(&"a".repeat(71), &hash));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 36 two-byte chars = 72 bytes, one more pushes past the limit
        let password = "é".repeat(37);
        let hash = hash_password(&password).unwrap();
        assert!(verify_password(&password, &hash));
        assert!(verify_password(&"é".repeat(36), &hash));
    }
}
