//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use promoradar_app::auth::AuthServiceError;

pub(crate) const INVALID_TOKEN: &str = "Invalid or expired token";

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::Validation(message) => StatusError::bad_request().brief(message),
        AuthServiceError::AlreadyExists => {
            StatusError::conflict().brief("Email is already registered")
        }
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        AuthServiceError::Unauthorized => StatusError::unauthorized().brief(INVALID_TOKEN),
        AuthServiceError::NotFound => StatusError::not_found().brief("User not found"),
        AuthServiceError::Password(source) => {
            error!("password hashing failed: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Signer(source) => {
            error!("session signing failed: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Token(source) => {
            error!("session token processing failed: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Time(source) => {
            error!("session expiry out of range: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("auth storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
