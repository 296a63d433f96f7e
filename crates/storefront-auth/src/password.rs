//! Password hashing with Argon2id.
//!
//! OWASP-recommended parameters (m=19456 KiB, t=2, p=1). The login
//! path uses [`verify_password_uniform`], which performs a hash
//! verification even when the user record does not exist, so the
//! unknown-user and wrong-password cases cost the same.

use crate::error::AuthError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use std::sync::LazyLock;

fn argon2() -> Argon2<'static> {
    // Parameters are compile-time constants; Params::new cannot fail
    // for these values.
    let params = Params::new(19456, 2, 1, None).expect("valid Argon2 parameters");
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
}

/// Hash of a fixed throwaway password, verified against when the
/// username is unknown so both failure paths do equal work.
static DUMMY_HASH: LazyLock<String> = LazyLock::new(|| {
    hash_password("storefront-dummy-credential").expect("dummy hash computes")
});

/// Hash a password, producing a PHC-formatted string.
///
/// # Errors
///
/// Returns `AuthError::HashingFailed` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    argon2()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::HashingFailed(e.to_string()))
}

/// Verify a password against a PHC-formatted hash.
///
/// # Errors
///
/// Returns `AuthError::HashingFailed` if the stored hash cannot be
/// parsed (a data problem, not a wrong password).
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AuthError::HashingFailed(format!("bad stored hash: {e}")))?;

    match argon2().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(_) => Ok(false),
    }
}

/// Verify a password for the login path.
///
/// When `stored_hash` is `None` (no such user) the password is
/// verified against a dummy hash and the result is discarded, so the
/// caller's latency does not reveal whether the username exists. The
/// return value is `false` in that case regardless.
#[must_use]
pub fn verify_password_uniform(password: &str, stored_hash: Option<&str>) -> bool {
    match stored_hash {
        Some(hash) => verify_password(password, hash).unwrap_or(false),
        None => {
            let _ = verify_password(password, &DUMMY_HASH);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_phc_argon2id() {
        let hash = hash_password("secret").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("m=19456"));
    }

    #[test]
    fn correct_password_verifies() {
        let hash = hash_password("secret").unwrap();
        assert!(verify_password("secret", &hash).unwrap());
    }

    #[test]
    fn wrong_password_fails() {
        let hash = hash_password("secret").unwrap();
        assert!(!verify_password("other", &hash).unwrap());
    }

    #[test]
    fn same_password_different_salts() {
        let a = hash_password("secret").unwrap();
        let b = hash_password("secret").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("secret", &a).unwrap());
        assert!(verify_password("secret", &b).unwrap());
    }

    #[test]
    fn invalid_stored_hash_is_an_error() {
        let err = verify_password("secret", "not-a-hash").unwrap_err();
        assert!(matches!(err, AuthError::HashingFailed(_)));
    }

    #[test]
    fn uniform_verify_unknown_user_is_false() {
        assert!(!verify_password_uniform("anything", None));
    }

    #[test]
    fn uniform_verify_matches_plain_verify() {
        let hash = hash_password("secret").unwrap();
        assert!(verify_password_uniform("secret", Some(&hash)));
        assert!(!verify_password_uniform("wrong", Some(&hash)));
    }
}
