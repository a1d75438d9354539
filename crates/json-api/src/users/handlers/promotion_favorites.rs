//! Promotion Favorite Handlers

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use promoradar_app::domain::promotions::records::PromotionUuid;

use crate::{
    extensions::*, responses::PromotionIdsResponse, state::State,
    users::errors::into_status_error,
};

/// Promotion Favorite Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromotionFavoriteRequest {
    pub promo_id: Uuid,
}

fn ids_response(items: Vec<PromotionUuid>) -> PromotionIdsResponse {
    PromotionIdsResponse {
        items: items.into_iter().map(PromotionUuid::into_uuid).collect(),
    }
}

/// List Promotion Favorites Handler
#[endpoint(tags("user"), summary = "List Promotion Favorites", security(("bearer_auth" = [])))]
pub(crate) async fn index(depot: &mut Depot) -> Result<Json<PromotionIdsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let items = state
        .app
        .users
        .list_promotion_favorites(user.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ids_response(items)))
}

/// Add Promotion Favorite Handler
#[endpoint(
    tags("user"),
    summary = "Add Promotion Favorite",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Promotion favorited"),
        (status_code = StatusCode::NOT_FOUND, description = "Promotion not found"),
    ),
)]
pub(crate) async fn create(
    json: JsonBody<PromotionFavoriteRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PromotionIdsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let items = state
        .app
        .users
        .add_promotion_favorite(user.user_uuid, json.into_inner().promo_id.into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(ids_response(items)))
}

/// Clear Promotion Favorites Handler
#[endpoint(tags("user"), summary = "Clear Promotion Favorites", security(("bearer_auth" = [])))]
pub(crate) async fn clear(depot: &mut Depot) -> Result<Json<PromotionIdsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    state
        .app
        .users
        .clear_promotion_favorites(user.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(PromotionIdsResponse { items: Vec::new() }))
}

/// Remove Promotion Favorite Handler
#[endpoint(tags("user"), summary = "Remove Promotion Favorite", security(("bearer_auth" = [])))]
pub(crate) async fn delete(
    promotion: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PromotionIdsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let items = state
        .app
        .users
        .remove_promotion_favorite(user.user_uuid, promotion.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ids_response(items)))
}
