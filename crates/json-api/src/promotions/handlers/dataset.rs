//! Dataset Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*, promotions::errors::into_status_error, responses::DatasetResponse,
    state::State,
};

/// Dataset Handler
///
/// The whole public catalog in one response, for clients that filter
/// locally.
#[endpoint(tags("promotions"), summary = "Catalog Dataset")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<DatasetResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let dataset = state
        .app
        .promotions
        .get_dataset()
        .await
        .map_err(into_status_error)?;

    Ok(Json(dataset.into()))
}
