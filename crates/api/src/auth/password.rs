//! Argon2id password hashing and verification.
//!
//! Hashes use the Argon2id variant at its default (fixed) work level with a
//! cryptographically random salt from [`OsRng`], stored in PHC string
//! format so the parameters and salt travel with the digest. Verification
//! is constant-time; a mismatch is a normal `false` result, never an error.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash a plaintext password, returning the PHC-formatted digest.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(digest.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted digest.
///
/// `Ok(false)` means the password does not match. `Err` means the stored
/// digest itself is malformed -- that login attempt fails, nothing else.
pub fn verify_password(
    password: &str,
    digest: &str,
) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(digest)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}
