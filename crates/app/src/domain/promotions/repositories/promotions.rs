//! Promotions Repository

use std::str::FromStr;

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    promotions::{
        data::{NewPromotion, PromotionFilter, PromotionUpdate, escape_like},
        records::{PromotionRecord, PromotionStatus, PromotionUuid},
    },
    users::records::UserUuid,
};

const COLUMN_PER_USER_LIMIT: &str = "per_user_limit";
const COLUMN_GLOBAL_QUOTA: &str = "global_quota";
const COLUMN_DAILY_QUOTA: &str = "daily_quota";

const LIST_PUBLISHED_PROMOTIONS_SQL: &str = include_str!("sql/list_published_promotions.sql");
const LIST_ALL_PUBLISHED_PROMOTIONS_SQL: &str =
    include_str!("sql/list_all_published_promotions.sql");
const LIST_BRAND_PROMOTIONS_SQL: &str = include_str!("sql/list_brand_promotions.sql");
const GET_PROMOTION_SQL: &str = include_str!("sql/get_promotion.sql");
const LOCK_PROMOTION_SQL: &str = include_str!("sql/lock_promotion.sql");
const CREATE_PROMOTION_SQL: &str = include_str!("sql/create_promotion.sql");
const UPDATE_PROMOTION_SQL: &str = include_str!("sql/update_promotion.sql");
const SET_PROMOTION_STATUS_SQL: &str = include_str!("sql/set_promotion_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPromotionsRepository;

impl PgPromotionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Published promotions matching `filter`, soonest ending first.
    pub(crate) async fn list_published_promotions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &PromotionFilter,
        at: Timestamp,
    ) -> Result<Vec<PromotionRecord>, sqlx::Error> {
        let search = filter
            .search_term()
            .map(|term| format!("%{}%", escape_like(term)));

        let brand_keys: Vec<String> = filter
            .brand_keys
            .iter()
            .map(|key| key.trim().to_lowercase())
            .collect();

        let event_tags: Vec<&str> = filter.event_tags.iter().map(|tag| tag.as_str()).collect();
        let promo_types: Vec<&str> = filter.promo_types.iter().map(|kind| kind.as_str()).collect();

        query_as::<Postgres, PromotionRecord>(LIST_PUBLISHED_PROMOTIONS_SQL)
            .bind(search)
            .bind(brand_keys)
            .bind(event_tags)
            .bind(promo_types)
            .bind(filter.only_active)
            .bind(filter.need_membership)
            .bind(SqlxTimestamp::from(at))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_all_published_promotions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<PromotionRecord>, sqlx::Error> {
        query_as::<Postgres, PromotionRecord>(LIST_ALL_PUBLISHED_PROMOTIONS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    /// Every promotion of a brand regardless of status, newest first.
    pub(crate) async fn list_brand_promotions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        brand_key: &str,
    ) -> Result<Vec<PromotionRecord>, sqlx::Error> {
        query_as::<Postgres, PromotionRecord>(LIST_BRAND_PROMOTIONS_SQL)
            .bind(brand_key)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
    ) -> Result<Option<PromotionRecord>, sqlx::Error> {
        query_as::<Postgres, PromotionRecord>(GET_PROMOTION_SQL)
            .bind(promotion)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Fetch a promotion and hold its row lock until `tx` ends.
    pub(crate) async fn lock_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
    ) -> Result<Option<PromotionRecord>, sqlx::Error> {
        query_as::<Postgres, PromotionRecord>(LOCK_PROMOTION_SQL)
            .bind(promotion)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: NewPromotion,
        creator: Option<UserUuid>,
    ) -> Result<PromotionRecord, sqlx::Error> {
        let per_user_limit = try_i32_from_u32(promotion.per_user_limit, COLUMN_PER_USER_LIMIT)?;
        let global_quota = try_optional_i32_from_u32(promotion.global_quota, COLUMN_GLOBAL_QUOTA)?;
        let daily_quota = try_optional_i32_from_u32(promotion.daily_quota, COLUMN_DAILY_QUOTA)?;

        query_as::<Postgres, PromotionRecord>(CREATE_PROMOTION_SQL)
            .bind(promotion.uuid)
            .bind(promotion.brand_key)
            .bind(promotion.title)
            .bind(promotion.description)
            .bind(promotion.promo_type.as_str())
            .bind(promotion.event_tag.as_str())
            .bind(SqlxTimestamp::from(promotion.start_at))
            .bind(SqlxTimestamp::from(promotion.end_at))
            .bind(promotion.need_membership)
            .bind(promotion.need_code)
            .bind(per_user_limit)
            .bind(global_quota)
            .bind(daily_quota)
            .bind(promotion.stacking_rule)
            .bind(creator)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
        update: PromotionUpdate,
    ) -> Result<PromotionRecord, sqlx::Error> {
        let per_user_limit = update
            .per_user_limit
            .map(|limit| try_i32_from_u32(limit, COLUMN_PER_USER_LIMIT))
            .transpose()?;

        let (set_global_quota, global_quota) = match update.global_quota {
            Some(quota) => (true, try_optional_i32_from_u32(quota, COLUMN_GLOBAL_QUOTA)?),
            None => (false, None),
        };

        let (set_daily_quota, daily_quota) = match update.daily_quota {
            Some(quota) => (true, try_optional_i32_from_u32(quota, COLUMN_DAILY_QUOTA)?),
            None => (false, None),
        };

        let set_stacking_rule = update.stacking_rule.is_some();
        let stacking_rule = update.stacking_rule.flatten();

        query_as::<Postgres, PromotionRecord>(UPDATE_PROMOTION_SQL)
            .bind(promotion)
            .bind(update.title)
            .bind(update.description)
            .bind(update.promo_type.map(|kind| kind.as_str()))
            .bind(update.event_tag.map(|tag| tag.as_str()))
            .bind(update.start_at.map(SqlxTimestamp::from))
            .bind(update.end_at.map(SqlxTimestamp::from))
            .bind(update.need_membership)
            .bind(update.need_code)
            .bind(per_user_limit)
            .bind(set_global_quota)
            .bind(global_quota)
            .bind(set_daily_quota)
            .bind(daily_quota)
            .bind(set_stacking_rule)
            .bind(stacking_rule)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_promotion_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
        status: PromotionStatus,
    ) -> Result<PromotionRecord, sqlx::Error> {
        query_as::<Postgres, PromotionRecord>(SET_PROMOTION_STATUS_SQL)
            .bind(promotion)
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for PromotionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            brand_key: row.try_get("brand_key")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            promo_type: parse_column(row, "promo_type")?,
            event_tag: parse_column(row, "event_tag")?,
            start_at: row.try_get::<SqlxTimestamp, _>("start_at")?.to_jiff(),
            end_at: row.try_get::<SqlxTimestamp, _>("end_at")?.to_jiff(),
            need_membership: row.try_get("need_membership")?,
            need_code: row.try_get("need_code")?,
            per_user_limit: try_u32_from_i32(
                row.try_get(COLUMN_PER_USER_LIMIT)?,
                COLUMN_PER_USER_LIMIT,
            )?,
            global_quota: row
                .try_get::<Option<i32>, _>(COLUMN_GLOBAL_QUOTA)?
                .map(|quota| try_u32_from_i32(quota, COLUMN_GLOBAL_QUOTA))
                .transpose()?,
            daily_quota: row
                .try_get::<Option<i32>, _>(COLUMN_DAILY_QUOTA)?
                .map(|quota| try_u32_from_i32(quota, COLUMN_DAILY_QUOTA))
                .transpose()?,
            stacking_rule: row.try_get("stacking_rule")?,
            status: parse_column(row, "status")?,
            creator_uuid: row.try_get("creator_uuid")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

fn parse_column<T>(row: &PgRow, column: &'static str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    row.try_get::<&str, _>(column)?
        .parse::<T>()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
}

fn try_optional_i32_from_u32(
    value: Option<u32>,
    column: &'static str,
) -> Result<Option<i32>, sqlx::Error> {
    value.map(|v| try_i32_from_u32(v, column)).transpose()
}

fn try_i32_from_u32(value: u32, column: &'static str) -> Result<i32, sqlx::Error> {
    i32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

fn try_u32_from_i32(value: i32, column: &'static str) -> Result<u32, sqlx::Error> {
    u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
