//! Stores Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::stores::{
    data::{NewStore, StoreUpdate},
    records::{StoreRecord, StoreUuid},
};

const LIST_STORES_SQL: &str = include_str!("sql/list_stores.sql");
const LIST_STORES_BY_BRAND_SQL: &str = include_str!("sql/list_stores_by_brand.sql");
const GET_STORE_SQL: &str = include_str!("sql/get_store.sql");
const CREATE_STORE_SQL: &str = include_str!("sql/create_store.sql");
const UPDATE_STORE_SQL: &str = include_str!("sql/update_store.sql");
const COUNT_BRAND_STORES_SQL: &str = include_str!("sql/count_brand_stores.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgStoresRepository;

impl PgStoresRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_stores(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<StoreRecord>, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(LIST_STORES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_stores_by_brand(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        brand_key: &str,
    ) -> Result<Vec<StoreRecord>, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(LIST_STORES_BY_BRAND_SQL)
            .bind(brand_key)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
    ) -> Result<Option<StoreRecord>, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(GET_STORE_SQL)
            .bind(store)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: NewStore,
    ) -> Result<StoreRecord, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(CREATE_STORE_SQL)
            .bind(store.uuid)
            .bind(store.brand_key)
            .bind(store.name)
            .bind(store.address)
            .bind(store.lat)
            .bind(store.lng)
            .bind(store.region)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
        update: StoreUpdate,
    ) -> Result<StoreRecord, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(UPDATE_STORE_SQL)
            .bind(store)
            .bind(update.brand_key)
            .bind(update.name)
            .bind(update.address)
            .bind(update.lat)
            .bind(update.lng)
            .bind(update.region)
            .bind(update.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    /// Count how many of `stores` belong to `brand_key`.
    pub(crate) async fn count_brand_stores(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        brand_key: &str,
        stores: &[StoreUuid],
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_BRAND_STORES_SQL)
            .bind(brand_key)
            .bind(stores)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for StoreRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            brand_key: row.try_get("brand_key")?,
            name: row.try_get("name")?,
            address: row.try_get("address")?,
            lat: row.try_get("lat")?,
            lng: row.try_get("lng")?,
            region: row.try_get("region")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
