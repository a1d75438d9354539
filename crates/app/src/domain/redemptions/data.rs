//! Redemptions Data

use jiff::{Span, Timestamp, civil::Date, tz::TimeZone};

use crate::domain::{
    promotions::records::PromotionUuid,
    redemptions::records::{DailyUsage, QuotaStats, RedemptionUuid},
    users::records::UserUuid,
};

/// Number of trailing UTC days covered by the daily usage histogram.
pub const DAILY_HISTORY_DAYS: i64 = 30;

/// Default number of users returned by the rankings.
pub const DEFAULT_RANKING_LIMIT: u32 = 100;

/// New Redemption Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NewRedemption {
    pub uuid: RedemptionUuid,
    pub user_uuid: UserUuid,
    pub promotion_uuid: PromotionUuid,
    pub created_at: Timestamp,
}

/// The UTC calendar day containing `at`.
#[must_use]
pub fn utc_date(at: Timestamp) -> Date {
    at.to_zoned(TimeZone::UTC).date()
}

/// `[start, end)` of the UTC calendar day containing `at`.
///
/// # Errors
///
/// Returns a [`jiff::Error`] when the day lies at the edge of the supported range.
pub fn utc_day_bounds(at: Timestamp) -> Result<(Timestamp, Timestamp), jiff::Error> {
    let day = utc_date(at);

    let start = day.to_zoned(TimeZone::UTC)?.timestamp();
    let end = day.tomorrow()?.to_zoned(TimeZone::UTC)?.timestamp();

    Ok((start, end))
}

/// `[start, end)` spanning the trailing [`DAILY_HISTORY_DAYS`] UTC days up to
/// and including the day containing `at`.
///
/// # Errors
///
/// Returns a [`jiff::Error`] when the window lies at the edge of the supported range.
pub fn history_window(at: Timestamp) -> Result<(Timestamp, Timestamp), jiff::Error> {
    let (_, end) = utc_day_bounds(at)?;

    let first_day = utc_date(at).checked_sub(Span::new().days(DAILY_HISTORY_DAYS - 1))?;
    let start = first_day.to_zoned(TimeZone::UTC)?.timestamp();

    Ok((start, end))
}

/// Combine raw counts with a promotion's quotas.
#[must_use]
pub fn build_quota_stats(
    global_quota: Option<u32>,
    daily_quota: Option<u32>,
    total_used: u64,
    distinct_users: u64,
    daily: Vec<DailyUsage>,
) -> QuotaStats {
    QuotaStats {
        global_quota,
        daily_quota,
        total_used,
        distinct_users,
        remaining: global_quota.map(|quota| u64::from(quota).saturating_sub(total_used)),
        daily,
    }
}
