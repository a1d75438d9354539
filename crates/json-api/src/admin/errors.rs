//! Admin Errors

use salvo::http::StatusError;
use tracing::error;

use promoradar_app::domain::admin::AdminServiceError;

pub(crate) fn into_status_error(error: AdminServiceError) -> StatusError {
    match error {
        AdminServiceError::NotFound => StatusError::not_found().brief("Not found"),
        AdminServiceError::Forbidden => {
            StatusError::forbidden().brief("You do not administer this brand")
        }
        AdminServiceError::AlreadyExists => {
            StatusError::conflict().brief("Brand key already exists")
        }
        AdminServiceError::InvalidReference => {
            StatusError::bad_request().brief("Referenced resource does not exist")
        }
        AdminServiceError::Validation(message) => StatusError::bad_request().brief(message),
        error @ (AdminServiceError::NotEditable(_)
        | AdminServiceError::InvalidTransition { .. }
        | AdminServiceError::InvalidData
        | AdminServiceError::MissingRequiredData
        | AdminServiceError::Time(_)) => StatusError::bad_request().brief(error.to_string()),
        AdminServiceError::Sql(source) => {
            error!("admin storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use promoradar_app::domain::promotions::records::PromotionStatus;

    use super::*;

    #[test]
    fn lifecycle_errors_are_bad_requests() {
        let status = into_status_error(AdminServiceError::InvalidTransition {
            from: PromotionStatus::Canceled,
            to: PromotionStatus::Published,
        });

        assert_eq!(status.code, StatusCode::BAD_REQUEST);
        assert_eq!(status.brief, "cannot move a promotion from Canceled to Published");
    }

    #[test]
    fn authorization_and_conflicts_keep_their_codes() {
        assert_eq!(
            into_status_error(AdminServiceError::Forbidden).code,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            into_status_error(AdminServiceError::AlreadyExists).code,
            StatusCode::CONFLICT
        );
        assert_eq!(
            into_status_error(AdminServiceError::NotFound).code,
            StatusCode::NOT_FOUND
        );
    }
}
