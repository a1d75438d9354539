//! Rankings Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*, responses::RankingListResponse, state::State,
    users::errors::usage_status_error,
};

const DEFAULT_LIMIT: u32 = 100;
const MAX_LIMIT: u32 = 500;

/// Rankings Handler
///
/// Top users by total claims. Ties share a rank. `limit` defaults to 100 and
/// is clamped to 1..=500.
#[endpoint(tags("user"), summary = "List Rankings", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<RankingListResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.current_user_or_401()?;

    let limit = limit.into_inner().unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let rankings = state
        .app
        .redemptions
        .list_rankings(limit)
        .await
        .map_err(usage_status_error)?;

    Ok(Json(RankingListResponse {
        items: rankings.into_iter().map(Into::into).collect(),
    }))
}
