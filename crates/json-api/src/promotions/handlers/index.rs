//! List Promotions Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::prelude::*;

use crate::{
    extensions::*,
    promotions::{errors::into_status_error, query::PromotionQuery},
    responses::PromotionListResponse,
    state::State,
};

/// List Promotions Handler
///
/// Published promotions, soonest ending first. Query: `search`,
/// `brandNames`, `eventTags`, `promoTypes`, `onlyActive`, `needMembership`.
#[endpoint(
    tags("promotions"),
    summary = "List Promotions",
    responses(
        (status_code = StatusCode::OK, description = "Matching promotions"),
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
        .list_promotions(query.filter()?, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(Json(promotions.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use promoradar_app::domain::promotions::records::{
        EventTag, PromotionStatus, PromotionUuid,
    };

    use crate::test_helpers::{Mocks, make_promotion};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.guest_service(Router::with_path("promotions").get(handler))
    }

    #[tokio::test]
    async fn test_list_forwards_filters() -> TestResult {
        let uuid = PromotionUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .promotions
            .expect_list_promotions()
            .once()
            .withf(|filter, _| {
                filter.search.as_deref() == Some("latte")
                    && filter.brand_keys.as_slice() == ["cafe"]
                    && filter.event_tags.as_slice() == [EventTag::Holiday]
                    && filter.only_active
                    && filter.need_membership == Some(false)
            })
            .return_once(move |_, _| Ok(vec![make_promotion(uuid, PromotionStatus::Published)]));

        let mut res = TestClient::get(
            "http://example.com/promotions?search=latte&brandNames=Cafe&eventTags=Holiday&onlyActive=true&needMembership=false",
        )
        .send(&make_service(mocks))
        .await;

        let body: PromotionListResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.items.len(), 1);
        assert_eq!(body.items.first().map(|p| p.promo_id), Some(uuid.into_uuid()));
        assert_eq!(body.items.first().map(|p| p.promo_type.as_str()), Some("Second_Cup"));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_promo_type_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.promotions.expect_list_promotions().never();

        let res = TestClient::get("http://example.com/promotions?promoTypes=Freebie")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
