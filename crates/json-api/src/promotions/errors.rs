//! Promotion Errors

use salvo::http::StatusError;
use tracing::error;

use promoradar_app::domain::{
    promotions::PromotionsServiceError, redemptions::RedemptionsServiceError,
};

use crate::auth::INVALID_TOKEN;

pub(crate) fn into_status_error(error: PromotionsServiceError) -> StatusError {
    match error {
        PromotionsServiceError::NotFound => StatusError::not_found().brief("Promotion not found"),
        PromotionsServiceError::Sql(source) => {
            error!("failed to load promotions: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn claim_status_error(error: RedemptionsServiceError) -> StatusError {
    if let Some(message) = error.claim_message() {
        return StatusError::bad_request().brief(message);
    }

    match error {
        RedemptionsServiceError::NotFound => StatusError::not_found().brief("Promotion not found"),
        // The promotion row is locked for the claim, so only the user reference can dangle.
        RedemptionsServiceError::InvalidReference => {
            StatusError::unauthorized().brief(INVALID_TOKEN)
        }
        error => {
            error!("failed to claim promotion: {error}");

            StatusError::internal_server_error()
        }
    }
}
