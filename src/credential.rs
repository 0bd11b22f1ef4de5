/// Password hashing and verification
///
/// Argon2id with a random salt per hash. The hash output is an opaque PHC
/// string; plaintext is never stored or logged after hashing.
use crate::error::{CertsError, CertsResult};
use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};

/// Hash a plaintext password
pub fn hash(plaintext: &str) -> CertsResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| CertsError::Internal(format!("Password hashing failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored hash
pub fn verify(plaintext: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

/// Precomputed hash of an unguessable password, verified when a login misses
/// on the username so hit and miss take equivalent work.
pub fn dummy_hash() -> &'static str {
    use std::sync::OnceLock;

    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| {
        hash("mycerts-dummy-credential").expect("hashing a fixed password cannot fail")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hashed = hash("correct horse battery staple").unwrap();
        assert!(verify("correct horse battery staple", &hashed));
        assert!(!verify("wrong password", &hashed));
    }

    #[test]
    fn test_hash_is_not_plaintext_and_is_salted() {
        let first = hash("hunter2").unwrap();
        let second = hash("hunter2").unwrap();

        assert!(!first.contains("hunter2"));
        // Different salts produce different hashes for the same input
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(!verify("anything", "not a phc string"));
    }

    #[test]
    fn test_dummy_hash_verifies_nothing_callers_send() {
        assert!(!verify("password123", dummy_hash()));
    }
}
