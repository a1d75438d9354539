//! Claim Promotion Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    observability::{ClaimOutcome, record_claim},
    promotions::errors::claim_status_error,
    responses::UsageResponse,
    state::State,
};

/// Claim Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ClaimResponse {
    pub success: bool,
    /// The caller's usage of the promotion after this claim
    pub usage: UsageResponse,
}

/// Claim Promotion Handler
///
/// Redeems a promotion once for the caller. Per-user, daily and global caps
/// are enforced atomically.
#[endpoint(
    tags("promotions"),
    summary = "Claim Promotion",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Promotion claimed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cap reached or promotion not active"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "Promotion not found"),
    ),
)]
#[tracing::instrument(
    name = "promotions.claim",
    skip(promotion, depot),
    fields(
        user_uuid = tracing::field::Empty,
        promotion_uuid = tracing::field::Empty,
        outcome = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    promotion: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ClaimResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;
    let promotion = promotion.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user.user_uuid));
    span.record("promotion_uuid", tracing::field::display(promotion));

    let result = state
        .app
        .redemptions
        .claim(user.user_uuid, promotion.into(), Timestamp::now())
        .await;

    let outcome = ClaimOutcome::of(&result);

    record_claim(outcome);
    span.record("outcome", outcome.as_label());

    let usage = result.map_err(claim_status_error)?;

    Ok(Json(ClaimResponse {
        success: true,
        usage: usage.into(),
    }))
}
