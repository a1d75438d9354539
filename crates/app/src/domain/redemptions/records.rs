//! Redemption Records

use std::fmt;

use jiff::{Timestamp, civil::Date};

use crate::{
    domain::{
        promotions::records::{PromotionRecord, PromotionUuid},
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Redemption UUID
pub type RedemptionUuid = TypedUuid<RedemptionRecord>;

/// A single successful claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedemptionRecord {
    pub uuid: RedemptionUuid,
    pub user_uuid: UserUuid,
    pub promotion_uuid: PromotionUuid,
    pub created_at: Timestamp,
}

/// A user's claims of one promotion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageSummary {
    pub promotion_uuid: PromotionUuid,
    pub count: u64,
    pub last_used: Timestamp,
}

/// Users ordered by how many promotions they have claimed.
///
/// Tied users share a rank and the next rank skips ahead (1, 1, 3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingEntry {
    pub rank: u64,
    pub user_uuid: UserUuid,
    pub username: String,
    pub total: u64,
}

/// Claims made on one UTC calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyUsage {
    pub date: Date,
    pub count: u64,
}

/// Quota consumption for a promotion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaStats {
    pub global_quota: Option<u32>,
    pub daily_quota: Option<u32>,
    pub total_used: u64,
    pub distinct_users: u64,
    /// `None` when the promotion has no global quota.
    pub remaining: Option<u64>,
    /// Trailing days with at least one claim, oldest first.
    pub daily: Vec<DailyUsage>,
}

/// Which cap stopped a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimitKind {
    PerUser,
    Daily,
    Global,
}

impl LimitKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PerUser => "per_user",
            Self::Daily => "daily",
            Self::Global => "global",
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A promotion together with its quota consumption.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionQuota {
    pub promotion: PromotionRecord,
    pub stats: QuotaStats,
}
