//! Usage Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use promoradar_app::domain::redemptions::records::{
    DailyUsage, PromotionQuota, QuotaStats, RankingEntry, UsageSummary,
};

use crate::responses::PromotionResponse;

/// Usage Response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UsageResponse {
    pub promo_id: Uuid,
    pub count: u64,
    pub last_used: String,
}

impl From<UsageSummary> for UsageResponse {
    fn from(usage: UsageSummary) -> Self {
        Self {
            promo_id: usage.promotion_uuid.into_uuid(),
            count: usage.count,
            last_used: usage.last_used.to_string(),
        }
    }
}

/// Usage List Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UsageListResponse {
    pub items: Vec<UsageResponse>,
}

/// Ranking Response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RankingResponse {
    /// Competition rank, tied users share a rank
    pub rank: u64,
    pub user_id: Uuid,
    pub username: String,
    pub total: u64,
}

impl From<RankingEntry> for RankingResponse {
    fn from(entry: RankingEntry) -> Self {
        Self {
            rank: entry.rank,
            user_id: entry.user_uuid.into_uuid(),
            username: entry.username,
            total: entry.total,
        }
    }
}

/// Ranking List Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RankingListResponse {
    pub items: Vec<RankingResponse>,
}

/// Daily Usage Response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct DailyUsageResponse {
    /// UTC calendar day, `YYYY-MM-DD`
    pub date: String,
    pub count: u64,
}

impl From<DailyUsage> for DailyUsageResponse {
    fn from(day: DailyUsage) -> Self {
        Self {
            date: day.date.to_string(),
            count: day.count,
        }
    }
}

/// Quota Stats Response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuotaStatsResponse {
    pub global_quota: Option<u32>,
    pub daily_quota: Option<u32>,
    pub total_used: u64,
    pub distinct_users: u64,
    /// `null` when the promotion has no global quota
    pub remaining: Option<u64>,
    pub daily: Vec<DailyUsageResponse>,
}

impl From<QuotaStats> for QuotaStatsResponse {
    fn from(stats: QuotaStats) -> Self {
        Self {
            global_quota: stats.global_quota,
            daily_quota: stats.daily_quota,
            total_used: stats.total_used,
            distinct_users: stats.distinct_users,
            remaining: stats.remaining,
            daily: stats.daily.into_iter().map(Into::into).collect(),
        }
    }
}

/// Promotion Quota Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromotionQuotaResponse {
    pub promotion: PromotionResponse,
    pub stats: QuotaStatsResponse,
}

impl From<PromotionQuota> for PromotionQuotaResponse {
    fn from(quota: PromotionQuota) -> Self {
        Self {
            promotion: quota.promotion.into(),
            stats: quota.stats.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn daily_buckets_use_iso_dates() {
        let day = DailyUsageResponse::from(DailyUsage {
            date: date(2026, 3, 9),
            count: 4,
        });

        assert_eq!(day.date, "2026-03-09");
        assert_eq!(day.count, 4);
    }
}
