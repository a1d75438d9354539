//! Users Service

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        brands::PgBrandAdminsRepository,
        favorites::PgFavoritesRepository,
        promotions::records::PromotionUuid,
        redemptions::PgRedemptionsRepository,
        users::{
            PgUsersRepository, UsersServiceError,
            records::{UserProfile, UserUuid},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    users: PgUsersRepository,
    favorites: PgFavoritesRepository,
    brand_admins: PgBrandAdminsRepository,
    redemptions: PgRedemptionsRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            users: PgUsersRepository::new(),
            favorites: PgFavoritesRepository::new(),
            brand_admins: PgBrandAdminsRepository::new(),
            redemptions: PgRedemptionsRepository::new(),
        }
    }
}

fn sanitize_brand_name(name: &str) -> Result<&str, UsersServiceError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(UsersServiceError::Validation(
            "brandName is required".to_string(),
        ));
    }

    Ok(name)
}

#[async_trait]
impl UsersService for PgUsersService {
    #[tracing::instrument(
        name = "users.service.get_profile",
        skip(self),
        fields(user_uuid = %user),
        err
    )]
    async fn get_profile(&self, user: UserUuid) -> Result<UserProfile, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self.users.get_user(&mut tx, user).await?;
        let brand_favorites = self.favorites.list_brands(&mut tx, user).await?;
        let promotion_favorites = self.favorites.list_promotions(&mut tx, user).await?;
        let admin_brands = self.brand_admins.list_brand_keys(&mut tx, user).await?;
        let usage = self.redemptions.list_user_usage(&mut tx, user).await?;

        tx.commit().await?;

        Ok(UserProfile {
            user: record,
            brand_favorites,
            promotion_favorites,
            admin_brands,
            usage,
        })
    }

    #[tracing::instrument(
        name = "users.service.list_brand_favorites",
        skip(self),
        fields(user_uuid = %user),
        err
    )]
    async fn list_brand_favorites(&self, user: UserUuid) -> Result<Vec<String>, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let brands = self.favorites.list_brands(&mut tx, user).await?;

        tx.commit().await?;

        Ok(brands)
    }

    #[tracing::instrument(
        name = "users.service.add_brand_favorite",
        skip(self),
        fields(user_uuid = %user),
        err
    )]
    async fn add_brand_favorite(
        &self,
        user: UserUuid,
        brand: String,
    ) -> Result<Vec<String>, UsersServiceError> {
        let brand = sanitize_brand_name(&brand)?;

        let mut tx = self.db.begin_transaction().await?;

        self.favorites.add_brand(&mut tx, user, brand).await?;

        let brands = self.favorites.list_brands(&mut tx, user).await?;

        tx.commit().await?;

        Ok(brands)
    }

    #[tracing::instrument(
        name = "users.service.remove_brand_favorite",
        skip(self),
        fields(user_uuid = %user),
        err
    )]
    async fn remove_brand_favorite(
        &self,
        user: UserUuid,
        brand: String,
    ) -> Result<Vec<String>, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let brand = brand.trim();

        if !brand.is_empty() {
            self.favorites.remove_brand(&mut tx, user, brand).await?;
        }

        let brands = self.favorites.list_brands(&mut tx, user).await?;

        tx.commit().await?;

        Ok(brands)
    }

    #[tracing::instrument(
        name = "users.service.clear_brand_favorites",
        skip(self),
        fields(user_uuid = %user),
        err
    )]
    async fn clear_brand_favorites(&self, user: UserUuid) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.favorites.clear_brands(&mut tx, user).await?;

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "users.service.list_promotion_favorites",
        skip(self),
        fields(user_uuid = %user),
        err
    )]
    async fn list_promotion_favorites(
        &self,
        user: UserUuid,
    ) -> Result<Vec<PromotionUuid>, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let promotions = self.favorites.list_promotions(&mut tx, user).await?;

        tx.commit().await?;

        Ok(promotions)
    }

    #[tracing::instrument(
        name = "users.service.add_promotion_favorite",
        skip(self),
        fields(user_uuid = %user, promotion_uuid = %promotion),
        err
    )]
    async fn add_promotion_favorite(
        &self,
        user: UserUuid,
        promotion: PromotionUuid,
    ) -> Result<Vec<PromotionUuid>, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.favorites.add_promotion(&mut tx, user, promotion).await?;

        let promotions = self.favorites.list_promotions(&mut tx, user).await?;

        tx.commit().await?;

        Ok(promotions)
    }

    #[tracing::instrument(
        name = "users.service.remove_promotion_favorite",
        skip(self),
        fields(user_uuid = %user, promotion_uuid = %promotion),
        err
    )]
    async fn remove_promotion_favorite(
        &self,
        user: UserUuid,
        promotion: PromotionUuid,
    ) -> Result<Vec<PromotionUuid>, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.favorites
            .remove_promotion(&mut tx, user, promotion)
            .await?;

        let promotions = self.favorites.list_promotions(&mut tx, user).await?;

        tx.commit().await?;

        Ok(promotions)
    }

    #[tracing::instrument(
        name = "users.service.clear_promotion_favorites",
        skip(self),
        fields(user_uuid = %user),
        err
    )]
    async fn clear_promotion_favorites(&self, user: UserUuid) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.favorites.clear_promotions(&mut tx, user).await?;

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "users.service.list_admin_brands",
        skip(self),
        fields(user_uuid = %user),
        err
    )]
    async fn list_admin_brands(&self, user: UserUuid) -> Result<Vec<String>, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let brands = self.brand_admins.list_brand_keys(&mut tx, user).await?;

        tx.commit().await?;

        Ok(brands)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// The user with their favorites, managed brands and promotion usage.
    async fn get_profile(&self, user: UserUuid) -> Result<UserProfile, UsersServiceError>;

    async fn list_brand_favorites(&self, user: UserUuid) -> Result<Vec<String>, UsersServiceError>;

    /// Follow a brand. The name is trimmed and must not be empty.
    ///
    /// Returns the updated list.
    async fn add_brand_favorite(
        &self,
        user: UserUuid,
        brand: String,
    ) -> Result<Vec<String>, UsersServiceError>;

    /// Unfollow a brand. Returns the updated list.
    async fn remove_brand_favorite(
        &self,
        user: UserUuid,
        brand: String,
    ) -> Result<Vec<String>, UsersServiceError>;

    async fn clear_brand_favorites(&self, user: UserUuid) -> Result<(), UsersServiceError>;

    async fn list_promotion_favorites(
        &self,
        user: UserUuid,
    ) -> Result<Vec<PromotionUuid>, UsersServiceError>;

    /// Favorite a promotion. Unknown promotions are reported as
    /// [`UsersServiceError::NotFound`].
    async fn add_promotion_favorite(
        &self,
        user: UserUuid,
        promotion: PromotionUuid,
    ) -> Result<Vec<PromotionUuid>, UsersServiceError>;

    async fn remove_promotion_favorite(
        &self,
        user: UserUuid,
        promotion: PromotionUuid,
    ) -> Result<Vec<PromotionUuid>, UsersServiceError>;

    async fn clear_promotion_favorites(&self, user: UserUuid) -> Result<(), UsersServiceError>;

    /// Keys of the brands the user administers.
    async fn list_admin_brands(&self, user: UserUuid) -> Result<Vec<String>, UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::redemptions::RedemptionsService,
        test::{
            TestContext,
            helpers::{create_brand, create_published, create_user, new_promotion, noon},
        },
    };

    use super::*;

    #[tokio::test]
    async fn brand_favorites_are_trimmed_and_deduplicated() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "member").await;

        ctx.users.add_brand_favorite(user.uuid, " Cafe ".to_string()).await?;
        ctx.users.add_brand_favorite(user.uuid, "Cafe".to_string()).await?;
        let favorites = ctx.users.add_brand_favorite(user.uuid, "Tea".to_string()).await?;

        assert_eq!(favorites, vec!["Cafe".to_string(), "Tea".to_string()]);

        let favorites = ctx
            .users
            .remove_brand_favorite(user.uuid, "Cafe".to_string())
            .await?;

        assert_eq!(favorites, vec!["Tea".to_string()]);

        ctx.users.clear_brand_favorites(user.uuid).await?;

        assert!(ctx.users.list_brand_favorites(user.uuid).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn blank_brand_favorite_is_rejected() {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "member").await;

        let result = ctx.users.add_brand_favorite(user.uuid, "   ".to_string()).await;

        assert!(
            matches!(result, Err(UsersServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );
    }

    #[tokio::test]
    async fn favoriting_unknown_promotion_is_not_found() {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "member").await;

        let result = ctx
            .users
            .add_promotion_favorite(user.uuid, PromotionUuid::new())
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn profile_collects_favorites_admin_brands_and_usage() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = create_user(&ctx, "owner").await;
        create_brand(&ctx, owner.uuid, "Cafe").await;

        let promotion = create_published(&ctx, owner.uuid, new_promotion("cafe", "Latte")).await;

        ctx.users.add_brand_favorite(owner.uuid, "Cafe".to_string()).await?;
        let favorites = ctx
            .users
            .add_promotion_favorite(owner.uuid, promotion.uuid)
            .await?;

        assert_eq!(favorites, vec![promotion.uuid]);

        ctx.redemptions.claim(owner.uuid, promotion.uuid, noon()).await?;

        let profile = ctx.users.get_profile(owner.uuid).await?;

        assert_eq!(profile.user.uuid, owner.uuid);
        assert!(profile.user.is_admin);
        assert_eq!(profile.brand_favorites, vec!["Cafe".to_string()]);
        assert_eq!(profile.promotion_favorites, vec![promotion.uuid]);
        assert_eq!(profile.admin_brands, vec!["cafe".to_string()]);
        assert_eq!(profile.usage.len(), 1);
        assert_eq!(profile.usage[0].count, 1);

        let favorites = ctx
            .users
            .remove_promotion_favorite(owner.uuid, promotion.uuid)
            .await?;

        assert!(favorites.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn profile_of_unknown_user_is_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.get_profile(UserUuid::new()).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
