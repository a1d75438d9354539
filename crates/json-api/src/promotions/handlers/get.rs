//! Get Promotion Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*, promotions::errors::into_status_error, responses::PromotionDetailResponse,
    state::State,
};

/// Get Promotion Handler
///
/// A published promotion with its brand's stores and its store exclusions.
#[endpoint(
    tags("promotions"),
    summary = "Get Promotion",
    responses(
        (status_code = StatusCode::OK, description = "Promotion detail"),
        (status_code = StatusCode::NOT_FOUND, description = "Promotion not found"),
    ),
)]
pub(crate) async fn handler(
    promotion: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PromotionDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let detail = state
        .app
        .promotions
        .get_promotion_detail(promotion.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(detail.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use promoradar_app::domain::{
        promotions::{
            PromotionsServiceError,
            records::{PromotionDetail, PromotionStatus, PromotionUuid},
        },
        stores::records::StoreUuid,
    };

    use crate::{
        errors::ErrorResponse,
        test_helpers::{Mocks, make_promotion, make_store},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.guest_service(Router::with_path("promotions/{promotion}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_detail() -> TestResult {
        let uuid = PromotionUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .promotions
            .expect_get_promotion_detail()
            .once()
            .withf(move |promotion| *promotion == uuid)
            .return_once(move |_| {
                Ok(PromotionDetail {
                    promotion: make_promotion(uuid, PromotionStatus::Published),
                    stores: vec![make_store(StoreUuid::new(), "cafe")],
                    exclusions: vec![],
                })
            });

        let mut res = TestClient::get(format!("http://example.com/promotions/{uuid}"))
            .send(&make_service(mocks))
            .await;

        let body: PromotionDetailResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.promotion.promo_id, uuid.into_uuid());
        assert_eq!(body.promotion.status, "Published");
        assert_eq!(body.stores.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_promotion_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .promotions
            .expect_get_promotion_detail()
            .once()
            .return_once(|_| Err(PromotionsServiceError::NotFound));

        let mut res = TestClient::get(format!(
            "http://example.com/promotions/{}",
            PromotionUuid::new()
        ))
        .send(&make_service(mocks))
        .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.message, "Promotion not found");

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_id_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.promotions.expect_get_promotion_detail().never();

        let res = TestClient::get("http://example.com/promotions/not-a-uuid")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
