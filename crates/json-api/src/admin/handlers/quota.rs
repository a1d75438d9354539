//! Promotion Quota Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    admin::errors::into_status_error, extensions::*, responses::PromotionQuotaResponse,
    state::State,
};

/// Promotion Quota Handler
///
/// Quota consumption with a per-day histogram of the last 30 UTC days.
#[endpoint(
    tags("admin"),
    summary = "Get Promotion Quota",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Quota statistics"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator of this brand"),
        (status_code = StatusCode::NOT_FOUND, description = "Promotion not found"),
    ),
)]
pub(crate) async fn handler(
    promotion: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PromotionQuotaResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let quota = state
        .app
        .admin
        .get_promotion_quota(user.user_uuid, promotion.into_inner().into(), Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(Json(quota.into()))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use promoradar_app::domain::{
        promotions::records::{PromotionStatus, PromotionUuid},
        redemptions::records::{DailyUsage, PromotionQuota, QuotaStats},
    };

    use crate::test_helpers::{Mocks, make_promotion};

    use super::*;

    #[tokio::test]
    async fn test_quota_reports_remaining_and_daily_counts() -> TestResult {
        let uuid = PromotionUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .admin
            .expect_get_promotion_quota()
            .once()
            .withf(move |_, promotion, _| *promotion == uuid)
            .return_once(move |_, _, _| {
                Ok(PromotionQuota {
                    promotion: make_promotion(uuid, PromotionStatus::Published),
                    stats: QuotaStats {
                        global_quota: Some(100),
                        daily_quota: None,
                        total_used: 7,
                        distinct_users: 5,
                        remaining: Some(93),
                        daily: vec![DailyUsage {
                            date: date(2026, 3, 14),
                            count: 7,
                        }],
                    },
                })
            });

        let mut res = TestClient::get(format!("http://example.com/admin/promotions/{uuid}/quota"))
            .send(&mocks.service(Router::with_path("admin/promotions/{promotion}/quota").get(handler)))
            .await;

        let body: PromotionQuotaResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.stats.remaining, Some(93));
        assert_eq!(body.stats.distinct_users, 5);
        assert_eq!(body.stats.daily.first().map(|d| d.date.as_str()), Some("2026-03-14"));

        Ok(())
    }
}
