//! Track Event Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use promoradar_app::domain::{
    brands::data::normalize_brand_key,
    tracking::{
        data::{Actor, TrackedEvent},
        records::UserAction,
    },
};

use crate::{extensions::*, state::State};

/// Track Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TrackRequest {
    /// One of `click_promo`, `view_promo`, `search`, `filter`, `open_map`,
    /// `open_brand` or `scroll_list`
    pub action: String,
    pub promo_id: Option<Uuid>,
    pub brand_name: Option<String>,
    pub search_keyword: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Track Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TrackResponse {
    pub success: bool,
}

/// First `X-Forwarded-For` hop, else the peer address.
fn client_ip(req: &Request) -> String {
    let forwarded = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    if let Some(forwarded) = forwarded {
        return forwarded.to_string();
    }

    let remote = req.remote_addr();

    remote
        .as_ipv4()
        .map(|addr| addr.ip().to_string())
        .or_else(|| remote.as_ipv6().map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

impl TrackRequest {
    fn into_event(self, actor: Actor) -> Result<TrackedEvent, StatusError> {
        let action = self
            .action
            .parse::<UserAction>()
            .or_400("unknown action")?;

        let mut event = TrackedEvent::user(actor, action);

        if let Some(promotion) = self.promo_id {
            event = event.with_promotion(promotion.into());
        }

        if let Some(brand) = self
            .brand_name
            .as_deref()
            .map(normalize_brand_key)
            .filter(|brand| !brand.is_empty())
        {
            event = event.with_brand(brand);
        }

        event.search_keyword = self
            .search_keyword
            .map(|keyword| keyword.trim().to_string())
            .filter(|keyword| !keyword.is_empty());
        event.tags = self.tags;

        Ok(event)
    }
}

/// Track Event Handler
///
/// Records a shopper interaction. Signed-in callers are tracked by user,
/// guests by client address. Storage failures never fail the request.
#[endpoint(
    tags("tracking"),
    summary = "Track Event",
    responses(
        (status_code = StatusCode::OK, description = "Event accepted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown action"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<TrackRequest>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<TrackResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let actor = match depot.current_user() {
        Some(user) => Actor::User(user.user_uuid),
        None => Actor::Guest(client_ip(req)),
    };

    let event = json.into_inner().into_event(actor)?;

    state.app.tracking.record_event(event, Timestamp::now()).await;

    Ok(Json(TrackResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use promoradar_app::domain::{
        promotions::records::PromotionUuid, tracking::records::BehaviorKind,
    };

    use crate::{
        errors::ErrorResponse,
        test_helpers::{Mocks, TEST_USER_UUID},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("track").post(handler)
    }

    #[tokio::test]
    async fn test_signed_in_events_use_the_user() -> TestResult {
        let promotion = PromotionUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .tracking
            .expect_record_event()
            .once()
            .withf(move |event, _| {
                event.actor == Actor::User(TEST_USER_UUID)
                    && event.kind == BehaviorKind::User
                    && event.action == "view_promo"
                    && event.promotion_uuid == Some(promotion)
                    && event.brand_key.as_deref() == Some("cafe")
            })
            .return_once(|_, _| ());

        let mut res = TestClient::post("http://example.com/track")
            .json(&json!({
                "action": "view_promo",
                "promoId": promotion.into_uuid(),
                "brandName": " Cafe ",
            }))
            .send(&mocks.service(route()))
            .await;

        let body: TrackResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.success);

        Ok(())
    }

    #[tokio::test]
    async fn test_guests_are_keyed_by_forwarded_address() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .tracking
            .expect_record_event()
            .once()
            .withf(|event, _| {
                event.actor == Actor::Guest("203.0.113.9".to_string())
                    && event.search_keyword.as_deref() == Some("latte")
                    && event.tags == vec!["coffee".to_string()]
            })
            .return_once(|_, _| ());

        let res = TestClient::post("http://example.com/track")
            .add_header("x-forwarded-for", "203.0.113.9, 10.0.0.1", true)
            .json(&json!({
                "action": "search",
                "searchKeyword": "  latte ",
                "tags": ["coffee"],
            }))
            .send(&mocks.guest_service(route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_action_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.tracking.expect_record_event().never();

        let mut res = TestClient::post("http://example.com/track")
            .json(&json!({ "action": "purchase" }))
            .send(&mocks.guest_service(route()))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "unknown action");

        Ok(())
    }
}
