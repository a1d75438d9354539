//! Browse Promotions Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::prelude::*;

use crate::{
    extensions::*,
    promotions::{errors::into_status_error, query::PromotionQuery},
    responses::PromotionListResponse,
    state::State,
};

/// Browse Promotions Handler
///
/// The list filters plus `sort` (`soonest_end`, `newest`, `brand`) and
/// `followed`, a comma separated list of brands listed first.
#[endpoint(
    tags("promotions"),
    summary = "Browse Promotions",
    responses(
        (status_code = StatusCode::OK, description = "Sorted promotions"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<PromotionListResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let query = req
        .parse_queries::<PromotionQuery>()
        .or_400("invalid query string")?;

    let promotions = state
        .app
        .promotions
        .browse_promotions(query.filter()?, query.sort()?, query.followed(), Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(Json(promotions.into()))
}
