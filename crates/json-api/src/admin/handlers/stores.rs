//! Admin Store Handlers

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    admin::{
        errors::into_status_error,
        requests::{BrandScope, CreateStoreRequest, UpdateStoreRequest},
    },
    extensions::*,
    responses::{StoreListResponse, StoreResponse},
    state::State,
};

/// List Stores Handler
///
/// Every store of `brandName`, inactive ones included.
#[endpoint(
    tags("admin"),
    summary = "List Brand Stores",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Stores"),
        (status_code = StatusCode::BAD_REQUEST, description = "brandName is required"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator of this brand"),
    ),
)]
pub(crate) async fn index(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<StoreListResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;
    let brand = req
        .parse_queries::<BrandScope>()
        .or_400("invalid query string")?
        .brand_name()?;

    let stores = state
        .app
        .admin
        .list_stores(user.user_uuid, brand)
        .await
        .map_err(into_status_error)?;

    Ok(Json(stores.into()))
}

/// Create Store Handler
#[endpoint(
    tags("admin"),
    summary = "Create Store",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Store created"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator of this brand"),
    ),
)]
pub(crate) async fn create(
    json: JsonBody<CreateStoreRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<StoreResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let store = state
        .app
        .admin
        .create_store(user.user_uuid, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(store.into()))
}

/// Update Store Handler
///
/// Moving a store to another brand needs admin rights on both brands.
#[endpoint(
    tags("admin"),
    summary = "Update Store",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Store updated"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator of this brand"),
        (status_code = StatusCode::NOT_FOUND, description = "Store not found"),
    ),
)]
#[tracing::instrument(
    name = "admin.stores.update",
    skip(store, json, depot),
    fields(store_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn update(
    store: PathParam<Uuid>,
    json: JsonBody<UpdateStoreRequest>,
    depot: &mut Depot,
) -> Result<Json<StoreResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;
    let store = store.into_inner();

    tracing::Span::current().record("store_uuid", tracing::field::display(store));

    let store = state
        .app
        .admin
        .update_store(user.user_uuid, store.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(store.into()))
}
