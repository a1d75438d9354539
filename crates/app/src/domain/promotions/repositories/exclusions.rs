//! Promotion Store Exclusions Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    promotions::records::{ExclusionRecord, PromotionUuid},
    stores::records::StoreUuid,
};

const LIST_EXCLUSIONS_SQL: &str = include_str!("sql/list_exclusions.sql");
const LIST_PUBLISHED_EXCLUSIONS_SQL: &str = include_str!("sql/list_published_exclusions.sql");
const DELETE_EXCLUSIONS_SQL: &str = include_str!("sql/delete_exclusions.sql");
const INSERT_EXCLUSIONS_SQL: &str = include_str!("sql/insert_exclusions.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgExclusionsRepository;

impl PgExclusionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_exclusions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
    ) -> Result<Vec<ExclusionRecord>, sqlx::Error> {
        query_as::<Postgres, ExclusionRecord>(LIST_EXCLUSIONS_SQL)
            .bind(promotion)
            .fetch_all(&mut **tx)
            .await
    }

    /// Exclusions attached to any published promotion.
    pub(crate) async fn list_published_exclusions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ExclusionRecord>, sqlx::Error> {
        query_as::<Postgres, ExclusionRecord>(LIST_PUBLISHED_EXCLUSIONS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    /// Swap the exclusion set of a promotion for `stores`.
    pub(crate) async fn replace_exclusions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
        stores: &[StoreUuid],
    ) -> Result<Vec<ExclusionRecord>, sqlx::Error> {
        query(DELETE_EXCLUSIONS_SQL)
            .bind(promotion)
            .execute(&mut **tx)
            .await?;

        if !stores.is_empty() {
            query(INSERT_EXCLUSIONS_SQL)
                .bind(promotion)
                .bind(stores)
                .execute(&mut **tx)
                .await?;
        }

        self.list_exclusions(tx, promotion).await
    }
}

impl<'r> FromRow<'r, PgRow> for ExclusionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            promotion_uuid: row.try_get("promotion_uuid")?,
            store_uuid: row.try_get("store_uuid")?,
            reason: row.try_get("reason")?,
        })
    }
}
