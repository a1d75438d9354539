//! Redemptions Repository

use jiff::{Timestamp, civil::Date};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::{
    promotions::records::PromotionUuid,
    redemptions::{
        data::NewRedemption,
        records::{DailyUsage, RankingEntry, RedemptionRecord, UsageSummary},
    },
    users::records::UserUuid,
};

const COUNT_USER_REDEMPTIONS_SQL: &str = include_str!("sql/count_user_redemptions.sql");
const COUNT_REDEMPTIONS_BETWEEN_SQL: &str = include_str!("sql/count_redemptions_between.sql");
const COUNT_REDEMPTIONS_SQL: &str = include_str!("sql/count_redemptions.sql");
const CREATE_REDEMPTION_SQL: &str = include_str!("sql/create_redemption.sql");
const GET_USER_USAGE_SQL: &str = include_str!("sql/get_user_usage.sql");
const LIST_USER_USAGE_SQL: &str = include_str!("sql/list_user_usage.sql");
const LIST_RANKINGS_SQL: &str = include_str!("sql/list_rankings.sql");
const GET_USAGE_TOTALS_SQL: &str = include_str!("sql/get_usage_totals.sql");
const LIST_DAILY_USAGE_SQL: &str = include_str!("sql/list_daily_usage.sql");

/// Raw totals for a promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UsageTotals {
    pub total_used: u64,
    pub distinct_users: u64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgRedemptionsRepository;

impl PgRedemptionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn count_user_redemptions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        promotion: PromotionUuid,
    ) -> Result<u64, sqlx::Error> {
        let count = query_scalar::<Postgres, i64>(COUNT_USER_REDEMPTIONS_SQL)
            .bind(user)
            .bind(promotion)
            .fetch_one(&mut **tx)
            .await?;

        try_u64_from_i64(count, "count")
    }

    /// Claims of `promotion` made within `[start, end)`.
    pub(crate) async fn count_redemptions_between(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let count = query_scalar::<Postgres, i64>(COUNT_REDEMPTIONS_BETWEEN_SQL)
            .bind(promotion)
            .bind(SqlxTimestamp::from(start))
            .bind(SqlxTimestamp::from(end))
            .fetch_one(&mut **tx)
            .await?;

        try_u64_from_i64(count, "count")
    }

    pub(crate) async fn count_redemptions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
    ) -> Result<u64, sqlx::Error> {
        let count = query_scalar::<Postgres, i64>(COUNT_REDEMPTIONS_SQL)
            .bind(promotion)
            .fetch_one(&mut **tx)
            .await?;

        try_u64_from_i64(count, "count")
    }

    pub(crate) async fn create_redemption(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        redemption: NewRedemption,
    ) -> Result<RedemptionRecord, sqlx::Error> {
        query_as::<Postgres, RedemptionRecord>(CREATE_REDEMPTION_SQL)
            .bind(redemption.uuid)
            .bind(redemption.user_uuid)
            .bind(redemption.promotion_uuid)
            .bind(SqlxTimestamp::from(redemption.created_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_user_usage(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        promotion: PromotionUuid,
    ) -> Result<UsageSummary, sqlx::Error> {
        query_as::<Postgres, UsageSummary>(GET_USER_USAGE_SQL)
            .bind(user)
            .bind(promotion)
            .fetch_one(&mut **tx)
            .await
    }

    /// A user's usage across promotions, most recent first.
    pub(crate) async fn list_user_usage(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<UsageSummary>, sqlx::Error> {
        query_as::<Postgres, UsageSummary>(LIST_USER_USAGE_SQL)
            .bind(user)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_rankings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: u32,
    ) -> Result<Vec<RankingEntry>, sqlx::Error> {
        query_as::<Postgres, RankingEntry>(LIST_RANKINGS_SQL)
            .bind(i64::from(limit))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_usage_totals(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
    ) -> Result<UsageTotals, sqlx::Error> {
        let row = sqlx::query(GET_USAGE_TOTALS_SQL)
            .bind(promotion)
            .fetch_one(&mut **tx)
            .await?;

        Ok(UsageTotals {
            total_used: try_u64_from_i64(row.try_get("total_used")?, "total_used")?,
            distinct_users: try_u64_from_i64(row.try_get("distinct_users")?, "distinct_users")?,
        })
    }

    /// Per-day claim counts within `[start, end)`, oldest first. Days without
    /// claims are omitted.
    pub(crate) async fn list_daily_usage(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<DailyUsage>, sqlx::Error> {
        query_as::<Postgres, DailyUsage>(LIST_DAILY_USAGE_SQL)
            .bind(promotion)
            .bind(SqlxTimestamp::from(start))
            .bind(SqlxTimestamp::from(end))
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for RedemptionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: row.try_get("user_uuid")?,
            promotion_uuid: row.try_get("promotion_uuid")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for UsageSummary {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            promotion_uuid: row.try_get("promotion_uuid")?,
            count: try_u64_from_i64(row.try_get("count")?, "count")?,
            last_used: row.try_get::<SqlxTimestamp, _>("last_used")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for RankingEntry {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            rank: try_u64_from_i64(row.try_get("rank")?, "rank")?,
            user_uuid: row.try_get("user_uuid")?,
            username: row.try_get("username")?,
            total: try_u64_from_i64(row.try_get("total")?, "total")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for DailyUsage {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let day: &str = row.try_get("day")?;

        let date = day
            .parse::<Date>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "day".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            date,
            count: try_u64_from_i64(row.try_get("count")?, "count")?,
        })
    }
}

fn try_u64_from_i64(value: i64, column: &'static str) -> Result<u64, sqlx::Error> {
    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
