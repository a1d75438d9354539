//! Brand Favorite Handlers

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*, responses::BrandNamesResponse, state::State, users::errors::into_status_error,
};

/// Brand Favorite Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BrandFavoriteRequest {
    pub brand_name: String,
}

/// List Brand Favorites Handler
#[endpoint(tags("user"), summary = "List Brand Favorites", security(("bearer_auth" = [])))]
pub(crate) async fn index(depot: &mut Depot) -> Result<Json<BrandNamesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let items = state
        .app
        .users
        .list_brand_favorites(user.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(BrandNamesResponse { items }))
}

/// Add Brand Favorite Handler
///
/// Follows a brand and returns the updated list.
#[endpoint(
    tags("user"),
    summary = "Add Brand Favorite",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Brand followed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty brand name"),
    ),
)]
pub(crate) async fn create(
    json: JsonBody<BrandFavoriteRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BrandNamesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let items = state
        .app
        .users
        .add_brand_favorite(user.user_uuid, json.into_inner().brand_name)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(BrandNamesResponse { items }))
}

/// Clear Brand Favorites Handler
#[endpoint(tags("user"), summary = "Clear Brand Favorites", security(("bearer_auth" = [])))]
pub(crate) async fn clear(depot: &mut Depot) -> Result<Json<BrandNamesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    state
        .app
        .users
        .clear_brand_favorites(user.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(BrandNamesResponse { items: Vec::new() }))
}

/// Remove Brand Favorite Handler
#[endpoint(tags("user"), summary = "Remove Brand Favorite", security(("bearer_auth" = [])))]
pub(crate) async fn delete(
    brand_name: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<BrandNamesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let items = state
        .app
        .users
        .remove_brand_favorite(user.user_uuid, brand_name.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(BrandNamesResponse { items }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use promoradar_app::domain::users::UsersServiceError;

    use crate::{
        errors::ErrorResponse,
        test_helpers::{Mocks, TEST_USER_UUID},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(
            Router::with_path("user/favorites/brands")
                .get(index)
                .post(create)
                .delete(clear)
                .push(Router::with_path("{brand_name}").delete(delete)),
        )
    }

    #[tokio::test]
    async fn test_list_returns_items() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_list_brand_favorites()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|_| Ok(vec!["cafe".to_string(), "tea".to_string()]));

        let mut res = TestClient::get("http://example.com/user/favorites/brands")
            .send(&make_service(mocks))
            .await;

        let body: BrandNamesResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.items, vec!["cafe".to_string(), "tea".to_string()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_returns_201_with_updated_list() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_add_brand_favorite()
            .once()
            .withf(|_, brand| brand == "  Cafe ")
            .return_once(|_, _| Ok(vec!["Cafe".to_string()]));

        let mut res = TestClient::post("http://example.com/user/favorites/brands")
            .json(&json!({ "brandName": "  Cafe " }))
            .send(&make_service(mocks))
            .await;

        let body: BrandNamesResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.items, vec!["Cafe".to_string()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_name_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_add_brand_favorite()
            .once()
            .return_once(|_, _| {
                Err(UsersServiceError::Validation(
                    "brand name must not be empty".to_string(),
                ))
            });

        let mut res = TestClient::post("http://example.com/user/favorites/brands")
            .json(&json!({ "brandName": "   " }))
            .send(&make_service(mocks))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "brand name must not be empty");

        Ok(())
    }

    #[tokio::test]
    async fn test_clear_returns_empty_list() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_clear_brand_favorites()
            .once()
            .return_once(|_| Ok(()));

        let mut res = TestClient::delete("http://example.com/user/favorites/brands")
            .send(&make_service(mocks))
            .await;

        let body: BrandNamesResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_passes_the_path_name() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_remove_brand_favorite()
            .once()
            .withf(|_, brand| brand == "cafe")
            .return_once(|_, _| Ok(vec!["tea".to_string()]));

        let mut res = TestClient::delete("http://example.com/user/favorites/brands/cafe")
            .send(&make_service(mocks))
            .await;

        let body: BrandNamesResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.items, vec!["tea".to_string()]);

        Ok(())
    }
}
