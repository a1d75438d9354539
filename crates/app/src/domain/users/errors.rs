//! Users service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UsersServiceError {
    /// The user, or the promotion being favorited, does not exist.
    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for UsersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::NotFound,
            Some(ErrorKind::CheckViolation) => {
                Self::Validation("invalid favorite".to_string())
            }
            _ => Self::Sql(error),
        }
    }
}
