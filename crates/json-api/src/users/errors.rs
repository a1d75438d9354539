//! User Errors

use salvo::http::StatusError;
use tracing::error;

use promoradar_app::domain::{
    redemptions::RedemptionsServiceError, users::UsersServiceError,
};

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::NotFound => StatusError::not_found().brief("Not found"),
        UsersServiceError::Validation(message) => StatusError::bad_request().brief(message),
        UsersServiceError::Sql(source) => {
            error!("failed to load user data: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Usage and rankings are reads, so every failure is a server error.
pub(crate) fn usage_status_error(error: RedemptionsServiceError) -> StatusError {
    error!("failed to load usage: {error}");

    StatusError::internal_server_error()
}
