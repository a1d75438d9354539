//! Promotion Lifecycle Handlers

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    admin::errors::into_status_error, extensions::*, responses::PromotionResponse, state::State,
};

/// Publish Promotion Handler
///
/// Draft to Published. Any other starting state is a 400.
#[endpoint(
    tags("admin"),
    summary = "Publish Promotion",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Promotion published"),
        (status_code = StatusCode::BAD_REQUEST, description = "Not a draft"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator of this brand"),
        (status_code = StatusCode::NOT_FOUND, description = "Promotion not found"),
    ),
)]
#[tracing::instrument(name = "admin.promotions.publish", skip(promotion, depot), err)]
pub(crate) async fn publish(
    promotion: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PromotionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let promotion = state
        .app
        .admin
        .publish_promotion(user.user_uuid, promotion.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(promotion.into()))
}

/// Cancel Promotion Handler
///
/// Draft or Published to Canceled. Canceling again returns the promotion as
/// it is.
#[endpoint(
    tags("admin"),
    summary = "Cancel Promotion",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Promotion canceled"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator of this brand"),
        (status_code = StatusCode::NOT_FOUND, description = "Promotion not found"),
    ),
)]
#[tracing::instrument(name = "admin.promotions.cancel", skip(promotion, depot), err)]
pub(crate) async fn cancel(
    promotion: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PromotionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let promotion = state
        .app
        .admin
        .cancel_promotion(user.user_uuid, promotion.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(promotion.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use promoradar_app::domain::{
        admin::AdminServiceError,
        promotions::records::{PromotionStatus, PromotionUuid},
    };

    use crate::test_helpers::{Mocks, make_promotion};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(
            Router::with_path("admin/promotions/{promotion}")
                .push(Router::with_path("publish").post(publish))
                .push(Router::with_path("cancel").post(cancel)),
        )
    }

    #[tokio::test]
    async fn test_publish_returns_published_promotion() -> TestResult {
        let uuid = PromotionUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .admin
            .expect_publish_promotion()
            .once()
            .withf(move |_, promotion| *promotion == uuid)
            .return_once(move |_, _| Ok(make_promotion(uuid, PromotionStatus::Published)));

        let mut res =
            TestClient::post(format!("http://example.com/admin/promotions/{uuid}/publish"))
                .send(&make_service(mocks))
                .await;

        let body: PromotionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "Published");

        Ok(())
    }

    #[tokio::test]
    async fn test_publish_of_canceled_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .admin
            .expect_publish_promotion()
            .once()
            .return_once(|_, _| {
                Err(AdminServiceError::InvalidTransition {
                    from: PromotionStatus::Canceled,
                    to: PromotionStatus::Published,
                })
            });

        let res = TestClient::post(format!(
            "http://example.com/admin/promotions/{}/publish",
            PromotionUuid::new()
        ))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_by_other_brand_admin_returns_403() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .admin
            .expect_cancel_promotion()
            .once()
            .return_once(|_, _| Err(AdminServiceError::Forbidden));

        let res = TestClient::post(format!(
            "http://example.com/admin/promotions/{}/cancel",
            PromotionUuid::new()
        ))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
