//! Redemptions service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::redemptions::records::LimitKind;

#[derive(Debug, Error)]
pub enum RedemptionsServiceError {
    /// The promotion does not exist or is not published.
    #[error("promotion not found")]
    NotFound,

    /// The claim instant lies outside the promotion's window.
    #[error("promotion is not active")]
    NotActive,

    #[error("{0} limit reached")]
    LimitReached(LimitKind),

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid time window")]
    Time(#[source] jiff::Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<jiff::Error> for RedemptionsServiceError {
    fn from(error: jiff::Error) -> Self {
        Self::Time(error)
    }
}

impl From<Error> for RedemptionsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            _ => Self::Sql(error),
        }
    }
}

impl RedemptionsServiceError {
    /// Human readable reason for a rejected claim.
    #[must_use]
    pub fn claim_message(&self) -> Option<&'static str> {
        match self {
            Self::NotActive => Some("Promotion is not currently active"),
            Self::LimitReached(LimitKind::PerUser) => {
                Some("You have reached the usage limit for this promotion")
            }
            Self::LimitReached(LimitKind::Daily) => {
                Some("Daily quota for this promotion has been reached")
            }
            Self::LimitReached(LimitKind::Global) => {
                Some("This promotion has been fully redeemed")
            }
            _ => None,
        }
    }
}
