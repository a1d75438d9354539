//! Brands Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::brands::{
    data::{BrandUpdate, NewBrand},
    records::BrandRecord,
};

const LIST_BRANDS_SQL: &str = include_str!("sql/list_brands.sql");
const LIST_BRANDS_BY_KEYS_SQL: &str = include_str!("sql/list_brands_by_keys.sql");
const GET_BRAND_SQL: &str = include_str!("sql/get_brand.sql");
const CREATE_BRAND_SQL: &str = include_str!("sql/create_brand.sql");
const UPDATE_BRAND_SQL: &str = include_str!("sql/update_brand.sql");
const DELETE_BRAND_CATEGORIES_SQL: &str = include_str!("sql/delete_brand_categories.sql");
const INSERT_BRAND_CATEGORIES_SQL: &str = include_str!("sql/insert_brand_categories.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBrandsRepository;

impl PgBrandsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_brands(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<BrandRecord>, sqlx::Error> {
        query_as::<Postgres, BrandRecord>(LIST_BRANDS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_brands_by_keys(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        keys: &[String],
    ) -> Result<Vec<BrandRecord>, sqlx::Error> {
        query_as::<Postgres, BrandRecord>(LIST_BRANDS_BY_KEYS_SQL)
            .bind(keys)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_brand(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: &str,
    ) -> Result<Option<BrandRecord>, sqlx::Error> {
        query_as::<Postgres, BrandRecord>(GET_BRAND_SQL)
            .bind(key)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_brand(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: &str,
    ) -> Result<BrandRecord, sqlx::Error> {
        query_as::<Postgres, BrandRecord>(GET_BRAND_SQL)
            .bind(key)
            .fetch_one(&mut **tx)
            .await
    }

    /// Insert the brand and its categories, then read it back.
    pub(crate) async fn create_brand(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        brand: NewBrand,
    ) -> Result<BrandRecord, sqlx::Error> {
        query(CREATE_BRAND_SQL)
            .bind(&brand.key)
            .bind(brand.display_name)
            .bind(brand.logo_url)
            .bind(brand.primary_color)
            .bind(brand.secondary_color)
            .bind(brand.text_color)
            .execute(&mut **tx)
            .await?;

        self.insert_categories(tx, &brand.key, &brand.categories)
            .await?;

        self.get_brand(tx, &brand.key).await
    }

    pub(crate) async fn update_brand(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: &str,
        update: BrandUpdate,
    ) -> Result<BrandRecord, sqlx::Error> {
        let rows_affected = query(UPDATE_BRAND_SQL)
            .bind(key)
            .bind(update.display_name)
            .bind(update.logo_url)
            .bind(update.primary_color)
            .bind(update.secondary_color)
            .bind(update.text_color)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        if let Some(categories) = update.categories {
            query(DELETE_BRAND_CATEGORIES_SQL)
                .bind(key)
                .execute(&mut **tx)
                .await?;

            self.insert_categories(tx, key, &categories).await?;
        }

        self.get_brand(tx, key).await
    }

    async fn insert_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: &str,
        categories: &[String],
    ) -> Result<(), sqlx::Error> {
        if categories.is_empty() {
            return Ok(());
        }

        query(INSERT_BRAND_CATEGORIES_SQL)
            .bind(key)
            .bind(categories)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for BrandRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            key: row.try_get("brand_key")?,
            display_name: row.try_get("display_name")?,
            logo_url: row.try_get("logo_url")?,
            primary_color: row.try_get("primary_color")?,
            secondary_color: row.try_get("secondary_color")?,
            text_color: row.try_get("text_color")?,
            categories: row.try_get("categories")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
