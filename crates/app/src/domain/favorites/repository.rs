//! Favorites Repository

use sqlx::{Postgres, Transaction, query, query_scalar};

use crate::domain::{promotions::records::PromotionUuid, users::records::UserUuid};

const LIST_FAVORITE_BRANDS_SQL: &str = include_str!("sql/list_favorite_brands.sql");
const ADD_FAVORITE_BRAND_SQL: &str = include_str!("sql/add_favorite_brand.sql");
const REMOVE_FAVORITE_BRAND_SQL: &str = include_str!("sql/remove_favorite_brand.sql");
const CLEAR_FAVORITE_BRANDS_SQL: &str = include_str!("sql/clear_favorite_brands.sql");
const LIST_FAVORITE_PROMOTIONS_SQL: &str = include_str!("sql/list_favorite_promotions.sql");
const ADD_FAVORITE_PROMOTION_SQL: &str = include_str!("sql/add_favorite_promotion.sql");
const REMOVE_FAVORITE_PROMOTION_SQL: &str = include_str!("sql/remove_favorite_promotion.sql");
const CLEAR_FAVORITE_PROMOTIONS_SQL: &str = include_str!("sql/clear_favorite_promotions.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgFavoritesRepository;

impl PgFavoritesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Followed brand names, in the order they were added.
    pub(crate) async fn list_brands(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<String>, sqlx::Error> {
        query_scalar::<Postgres, String>(LIST_FAVORITE_BRANDS_SQL)
            .bind(user)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn add_brand(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        brand: &str,
    ) -> Result<(), sqlx::Error> {
        query(ADD_FAVORITE_BRAND_SQL)
            .bind(user)
            .bind(brand)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn remove_brand(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        brand: &str,
    ) -> Result<(), sqlx::Error> {
        query(REMOVE_FAVORITE_BRAND_SQL)
            .bind(user)
            .bind(brand)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn clear_brands(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<(), sqlx::Error> {
        query(CLEAR_FAVORITE_BRANDS_SQL)
            .bind(user)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_promotions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<PromotionUuid>, sqlx::Error> {
        query_scalar::<Postgres, PromotionUuid>(LIST_FAVORITE_PROMOTIONS_SQL)
            .bind(user)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn add_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        promotion: PromotionUuid,
    ) -> Result<(), sqlx::Error> {
        query(ADD_FAVORITE_PROMOTION_SQL)
            .bind(user)
            .bind(promotion)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn remove_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        promotion: PromotionUuid,
    ) -> Result<(), sqlx::Error> {
        query(REMOVE_FAVORITE_PROMOTION_SQL)
            .bind(user)
            .bind(promotion)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn clear_promotions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<(), sqlx::Error> {
        query(CLEAR_FAVORITE_PROMOTIONS_SQL)
            .bind(user)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}
