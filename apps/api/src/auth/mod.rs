// Authentication: bearer tokens for catalog writes and password hashing
// for the accounts that mint them

pub mod jwt;
pub mod password;

use thiserror::Error;

/// Errors raised while issuing or checking credentials
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token has expired")]
    TokenExpired,

    #[error("{0}")]
    InvalidToken(jsonwebtoken::errors::Error),

    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Password must be at least {0} characters")]
    WeakPassword(usize),

    #[error("Password worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => Self::TokenExpired,
            _ => Self::InvalidToken(err),
        }
    }
}
