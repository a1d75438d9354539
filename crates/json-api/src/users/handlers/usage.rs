//! Promotion Usage Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*, responses::UsageListResponse, state::State,
    users::errors::usage_status_error,
};

/// Promotion Usage Handler
///
/// How often the caller has claimed each promotion, most recent first.
#[endpoint(tags("user"), summary = "List Promotion Usage", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UsageListResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let usage = state
        .app
        .redemptions
        .list_usage(user.user_uuid)
        .await
        .map_err(usage_status_error)?;

    Ok(Json(UsageListResponse {
        items: usage.into_iter().map(Into::into).collect(),
    }))
}
