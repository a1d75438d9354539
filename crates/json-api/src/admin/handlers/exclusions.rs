//! Promotion Exclusion Handlers

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    admin::{errors::into_status_error, requests::ReplaceExclusionsRequest},
    extensions::*,
    responses::ExclusionListResponse,
    state::State,
};

/// List Exclusions Handler
///
/// Stores of the brand where the promotion does not apply.
#[endpoint(tags("admin"), summary = "List Promotion Exclusions", security(("bearer_auth" = [])))]
pub(crate) async fn index(
    promotion: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ExclusionListResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let exclusions = state
        .app
        .admin
        .list_exclusions(user.user_uuid, promotion.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(exclusions.into()))
}

/// Replace Exclusions Handler
///
/// Replaces the whole set. Every store must belong to the promotion's brand.
#[endpoint(
    tags("admin"),
    summary = "Replace Promotion Exclusions",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Exclusions replaced"),
        (status_code = StatusCode::BAD_REQUEST, description = "Store of another brand"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator of this brand"),
        (status_code = StatusCode::NOT_FOUND, description = "Promotion not found"),
    ),
)]
#[tracing::instrument(
    name = "admin.exclusions.replace",
    skip(promotion, json, depot),
    fields(stores_count = tracing::field::Empty),
    err
)]
pub(crate) async fn replace(
    promotion: PathParam<Uuid>,
    json: JsonBody<ReplaceExclusionsRequest>,
    depot: &mut Depot,
) -> Result<Json<ExclusionListResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;
    let stores = json.into_inner().into_store_uuids();

    tracing::Span::current().record("stores_count", stores.len());

    let exclusions = state
        .app
        .admin
        .replace_exclusions(user.user_uuid, promotion.into_inner().into(), stores)
        .await
        .map_err(into_status_error)?;

    Ok(Json(exclusions.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use promoradar_app::domain::{
        admin::AdminServiceError,
        promotions::records::{ExclusionRecord, PromotionUuid},
        stores::records::StoreUuid,
    };

    use crate::test_helpers::Mocks;

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(
            Router::with_path("admin/promotions/{promotion}/exclusions")
                .get(index)
                .put(replace),
        )
    }

    #[tokio::test]
    async fn test_replace_returns_new_set() -> TestResult {
        let promotion = PromotionUuid::new();
        let store = StoreUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .admin
            .expect_replace_exclusions()
            .once()
            .withf(move |_, p, stores| *p == promotion && stores.as_slice() == [store])
            .return_once(move |_, _, _| {
                Ok(vec![ExclusionRecord {
                    promotion_uuid: promotion,
                    store_uuid: store,
                    reason: None,
                }])
            });

        let mut res = TestClient::put(format!(
            "http://example.com/admin/promotions/{promotion}/exclusions"
        ))
        .json(&json!({ "storeIds": [store.into_uuid()] }))
        .send(&make_service(mocks))
        .await;

        let body: ExclusionListResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.items.first().map(|e| e.store_id), Some(store.into_uuid()));

        Ok(())
    }

    #[tokio::test]
    async fn test_foreign_store_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .admin
            .expect_replace_exclusions()
            .once()
            .return_once(|_, _, _| {
                Err(AdminServiceError::Validation(
                    "store belongs to another brand".to_string(),
                ))
            });

        let res = TestClient::put(format!(
            "http://example.com/admin/promotions/{}/exclusions",
            PromotionUuid::new()
        ))
        .json(&json!({ "storeIds": [Uuid::now_v7()] }))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_returns_exclusions() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .admin
            .expect_list_exclusions()
            .once()
            .return_once(|_, _| Ok(Vec::new()));

        let mut res = TestClient::get(format!(
            "http://example.com/admin/promotions/{}/exclusions",
            PromotionUuid::new()
        ))
        .send(&make_service(mocks))
        .await;

        let body: ExclusionListResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.items.is_empty());

        Ok(())
    }
}
