//! Admin Promotion Handlers

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    admin::{
        errors::into_status_error,
        requests::{BrandScope, CreatePromotionRequest, UpdatePromotionRequest},
    },
    extensions::*,
    responses::{PromotionListResponse, PromotionResponse},
    state::State,
};

/// List Brand Promotions Handler
///
/// Every promotion of `brandName` in any state.
#[endpoint(
    tags("admin"),
    summary = "List Brand Promotions",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Promotions"),
        (status_code = StatusCode::BAD_REQUEST, description = "brandName is required"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator of this brand"),
    ),
)]
pub(crate) async fn index(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<PromotionListResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;
    let brand = req
        .parse_queries::<BrandScope>()
        .or_400("invalid query string")?
        .brand_name()?;

    let promotions = state
        .app
        .admin
        .list_promotions(user.user_uuid, brand)
        .await
        .map_err(into_status_error)?;

    Ok(Json(promotions.into()))
}

/// Create Promotion Handler
///
/// New promotions start as drafts.
#[endpoint(
    tags("admin"),
    summary = "Create Promotion",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Draft created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator of this brand"),
    ),
)]
#[tracing::instrument(
    name = "admin.promotions.create",
    skip(json, depot, res),
    fields(promotion_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn create(
    json: JsonBody<CreatePromotionRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PromotionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;
    let promotion = json.into_inner().into_new_promotion()?;

    tracing::Span::current().record("promotion_uuid", tracing::field::display(promotion.uuid));

    let promotion = state
        .app
        .admin
        .create_promotion(user.user_uuid, promotion)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(promotion.into()))
}

/// Update Promotion Handler
///
/// Only drafts can be edited.
#[endpoint(
    tags("admin"),
    summary = "Update Promotion",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Draft updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Not a draft, or invalid data"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator of this brand"),
        (status_code = StatusCode::NOT_FOUND, description = "Promotion not found"),
    ),
)]
#[tracing::instrument(
    name = "admin.promotions.update",
    skip(promotion, json, depot),
    fields(promotion_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn update(
    promotion: PathParam<Uuid>,
    json: JsonBody<UpdatePromotionRequest>,
    depot: &mut Depot,
) -> Result<Json<PromotionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;
    let promotion = promotion.into_inner();
    let promotion_update = json.into_inner().into_update()?;

    tracing::Span::current().record("promotion_uuid", tracing::field::display(promotion));

    let promotion = state
        .app
        .admin
        .update_promotion(user.user_uuid, promotion.into(), promotion_update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(promotion.into()))
}
