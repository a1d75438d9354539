//! Behaviour Events Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, types::Json};

use crate::domain::tracking::{data::NewBehaviorEvent, records::BehaviorEventRecord};

const CREATE_BEHAVIOR_EVENT_SQL: &str = include_str!("sql/create_behavior_event.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBehaviorEventsRepository;

impl PgBehaviorEventsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_event(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event: NewBehaviorEvent,
    ) -> Result<BehaviorEventRecord, sqlx::Error> {
        query_as::<Postgres, BehaviorEventRecord>(CREATE_BEHAVIOR_EVENT_SQL)
            .bind(event.uuid)
            .bind(event.actor)
            .bind(event.kind.as_str())
            .bind(event.action)
            .bind(event.promotion_uuid)
            .bind(event.brand_key)
            .bind(event.store_uuid)
            .bind(event.search_keyword)
            .bind(Json(event.tags))
            .bind(SqlxTimestamp::from(event.created_at))
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for BehaviorEventRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind: &str = row.try_get("kind")?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            actor: row.try_get("actor")?,
            kind: kind.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "kind".to_string(),
                source: Box::new(e),
            })?,
            action: row.try_get("action")?,
            promotion_uuid: row.try_get("promotion_uuid")?,
            brand_key: row.try_get("brand_key")?,
            store_uuid: row.try_get("store_uuid")?,
            search_keyword: row.try_get("search_keyword")?,
            tags: row.try_get::<Json<Vec<String>>, _>("tags")?.0,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
