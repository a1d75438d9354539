//! Admin service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::promotions::records::PromotionStatus;

#[derive(Debug, Error)]
pub enum AdminServiceError {
    #[error("resource not found")]
    NotFound,

    /// The acting user does not administer the brand.
    #[error("not an administrator of this brand")]
    Forbidden,

    #[error("brand already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("{0}")]
    Validation(String),

    /// Only draft promotions can be edited.
    #[error("a {0} promotion can no longer be edited")]
    NotEditable(PromotionStatus),

    #[error("cannot move a promotion from {from} to {to}")]
    InvalidTransition {
        from: PromotionStatus,
        to: PromotionStatus,
    },

    #[error("invalid time window")]
    Time(#[source] jiff::Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<jiff::Error> for AdminServiceError {
    fn from(error: jiff::Error) -> Self {
        Self::Time(error)
    }
}

impl From<Error> for AdminServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
