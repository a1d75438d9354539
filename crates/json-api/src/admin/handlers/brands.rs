//! Admin Brand Handlers

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use crate::{
    admin::{
        errors::into_status_error,
        requests::{CreateBrandRequest, UpdateBrandRequest},
    },
    extensions::*,
    responses::{BrandListResponse, BrandResponse},
    state::State,
};

/// List Managed Brands Handler
#[endpoint(tags("admin"), summary = "List Managed Brands", security(("bearer_auth" = [])))]
pub(crate) async fn index(depot: &mut Depot) -> Result<Json<BrandListResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let brands = state
        .app
        .admin
        .list_managed_brands(user.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(brands.into()))
}

/// Create Brand Handler
///
/// The caller becomes the brand's first administrator.
#[endpoint(
    tags("admin"),
    summary = "Create Brand",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Brand created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::CONFLICT, description = "Brand key already exists"),
    ),
)]
#[tracing::instrument(
    name = "admin.brands.create",
    skip(json, depot, res),
    fields(user_uuid = tracing::field::Empty, brand_key = tracing::field::Empty),
    err
)]
pub(crate) async fn create(
    json: JsonBody<CreateBrandRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BrandResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let brand = state
        .app
        .admin
        .create_brand(user.user_uuid, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user.user_uuid));
    span.record("brand_key", brand.key.as_str());

    res.status_code(StatusCode::CREATED);

    Ok(Json(brand.into()))
}

/// Update Brand Handler
#[endpoint(
    tags("admin"),
    summary = "Update Brand",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Brand updated"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator of this brand"),
        (status_code = StatusCode::NOT_FOUND, description = "Brand not found"),
    ),
)]
pub(crate) async fn update(
    brand_key: PathParam<String>,
    json: JsonBody<UpdateBrandRequest>,
    depot: &mut Depot,
) -> Result<Json<BrandResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let brand = state
        .app
        .admin
        .update_brand(user.user_uuid, brand_key.into_inner(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(brand.into()))
}
