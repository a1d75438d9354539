//! Promotions service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromotionsServiceError {
    /// The promotion does not exist or is not published.
    #[error("promotion not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PromotionsServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::NotFound,
            error => Self::Sql(error),
        }
    }
}
