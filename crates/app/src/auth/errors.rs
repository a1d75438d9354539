//! Auth service errors.

use argon2::password_hash;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::{SessionTokenError, SignerError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The bearer token is malformed, unknown, expired or revoked.
    #[error("invalid or expired token")]
    Unauthorized,

    #[error("email already registered")]
    AlreadyExists,

    #[error("{0}")]
    Validation(String),

    #[error("not found")]
    NotFound,

    #[error("password hashing error")]
    Password(#[source] password_hash::Error),

    #[error("session signing error")]
    Signer(#[from] SignerError),

    #[error("token processing error")]
    Token(#[source] SessionTokenError),

    #[error("session expiry is out of range")]
    Time(#[from] jiff::Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::CheckViolation) => Self::Validation("invalid signup".to_string()),
            _ => Self::Sql(error),
        }
    }
}

impl From<SessionTokenError> for AuthServiceError {
    fn from(error: SessionTokenError) -> Self {
        Self::Token(error)
    }
}

impl From<password_hash::Error> for AuthServiceError {
    fn from(error: password_hash::Error) -> Self {
        Self::Password(error)
    }
}
