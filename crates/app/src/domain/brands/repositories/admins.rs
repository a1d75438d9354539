//! Brand Admins Repository

use sqlx::{Postgres, Transaction, query, query_scalar};

use crate::domain::users::records::UserUuid;

const IS_BRAND_ADMIN_SQL: &str = include_str!("sql/is_brand_admin.sql");
const LIST_ADMIN_BRAND_KEYS_SQL: &str = include_str!("sql/list_admin_brand_keys.sql");
const ADD_BRAND_ADMIN_SQL: &str = include_str!("sql/add_brand_admin.sql");
const REMOVE_BRAND_ADMIN_SQL: &str = include_str!("sql/remove_brand_admin.sql");
const COUNT_ADMIN_BRANDS_SQL: &str = include_str!("sql/count_admin_brands.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBrandAdminsRepository;

impl PgBrandAdminsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn is_brand_admin(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        brand_key: &str,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(IS_BRAND_ADMIN_SQL)
            .bind(user)
            .bind(brand_key)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_brand_keys(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<String>, sqlx::Error> {
        query_scalar::<Postgres, String>(LIST_ADMIN_BRAND_KEYS_SQL)
            .bind(user)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn add_brand_admin(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        brand_key: &str,
    ) -> Result<(), sqlx::Error> {
        query(ADD_BRAND_ADMIN_SQL)
            .bind(user)
            .bind(brand_key)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn remove_brand_admin(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        brand_key: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REMOVE_BRAND_ADMIN_SQL)
            .bind(user)
            .bind(brand_key)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn count_admin_brands(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_ADMIN_BRANDS_SQL)
            .bind(user)
            .fetch_one(&mut **tx)
            .await
    }
}
