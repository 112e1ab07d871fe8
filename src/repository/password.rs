//! Password hashing
//!
//! Passwords are stored as salted Argon2 PHC strings, never in plaintext.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::domain::{DomainError, DomainResult};

/// Hash a plaintext password with a fresh random salt
pub fn hash_password(password: &str) -> DomainResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DomainError::PasswordHash(e.to_string()))
}

/// Check a plaintext password against a stored hash
pub fn verify_password(password: &str, stored_hash: &str) -> DomainResult<bool> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|e| DomainError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
