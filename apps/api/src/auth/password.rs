// Password hashing for catalog administrator accounts

use bcrypt::{hash, verify, DEFAULT_COST};

use super::AuthError;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Rejects passwords shorter than `MIN_PASSWORD_LENGTH` characters
pub fn check_strength(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(MIN_PASSWORD_LENGTH));
    }
    Ok(())
}

/// Hashes a password with bcrypt at the default cost
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    Ok(hash(password, DEFAULT_COST)?)
}

/// Checks a password against a stored bcrypt hash
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AuthError> {
    Ok(verify(password, password_hash)?)
}

/// Runs `hash_password` on the blocking thread pool
///
/// bcrypt at the default cost takes long enough to stall an async worker.
pub async fn hash_password_blocking(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_password(&password)).await?
}

/// Runs `verify_password` on the blocking thread pool
pub async fn verify_password_blocking(
    password: String,
    password_hash: String,
) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &password_hash)).await?
}
