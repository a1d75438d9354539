//! Admin Service

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        admin::{
            AdminServiceError,
            validation::{
                validate_new_brand, validate_new_promotion, validate_new_store,
                validate_update_limits, validate_window,
            },
        },
        brands::{
            PgBrandAdminsRepository, PgBrandsRepository,
            data::{BrandUpdate, NewBrand, normalize_brand_key, normalize_categories},
            records::BrandRecord,
        },
        promotions::{
            PgExclusionsRepository, PgPromotionsRepository,
            data::{NewPromotion, PromotionUpdate},
            records::{ExclusionRecord, PromotionRecord, PromotionStatus, PromotionUuid},
        },
        redemptions::{
            PgRedemptionsRepository,
            data::{build_quota_stats, history_window},
            records::PromotionQuota,
        },
        stores::{
            PgStoresRepository,
            data::{NewStore, StoreUpdate},
            records::{StoreRecord, StoreUuid},
        },
        tracking::{TrackingService, data::TrackedEvent, records::AdminAction},
        users::{PgUsersRepository, records::UserUuid},
    },
};

#[derive(Clone)]
pub struct PgAdminService {
    db: Db,
    brands: PgBrandsRepository,
    brand_admins: PgBrandAdminsRepository,
    stores: PgStoresRepository,
    promotions: PgPromotionsRepository,
    exclusions: PgExclusionsRepository,
    redemptions: PgRedemptionsRepository,
    users: PgUsersRepository,
    tracking: Arc<dyn TrackingService>,
}

impl PgAdminService {
    #[must_use]
    pub fn new(db: Db, tracking: Arc<dyn TrackingService>) -> Self {
        Self {
            db,
            brands: PgBrandsRepository::new(),
            brand_admins: PgBrandAdminsRepository::new(),
            stores: PgStoresRepository::new(),
            promotions: PgPromotionsRepository::new(),
            exclusions: PgExclusionsRepository::new(),
            redemptions: PgRedemptionsRepository::new(),
            users: PgUsersRepository::new(),
            tracking,
        }
    }

    async fn ensure_brand_admin(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        actor: UserUuid,
        brand_key: &str,
    ) -> Result<(), AdminServiceError> {
        if self.brand_admins.is_brand_admin(tx, actor, brand_key).await? {
            Ok(())
        } else {
            Err(AdminServiceError::Forbidden)
        }
    }

    /// Lock a promotion row and check the actor administers its brand.
    async fn lock_managed_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        actor: UserUuid,
        promotion: PromotionUuid,
    ) -> Result<PromotionRecord, AdminServiceError> {
        let record = self
            .promotions
            .lock_promotion(tx, promotion)
            .await?
            .ok_or(AdminServiceError::NotFound)?;

        self.ensure_brand_admin(tx, actor, &record.brand_key).await?;

        Ok(record)
    }

    async fn find_managed_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        actor: UserUuid,
        promotion: PromotionUuid,
    ) -> Result<PromotionRecord, AdminServiceError> {
        let record = self
            .promotions
            .find_promotion(tx, promotion)
            .await?
            .ok_or(AdminServiceError::NotFound)?;

        self.ensure_brand_admin(tx, actor, &record.brand_key).await?;

        Ok(record)
    }
}

#[async_trait]
impl AdminService for PgAdminService {
    #[tracing::instrument(
        name = "admin.service.list_managed_brands",
        skip(self),
        fields(actor_uuid = %actor),
        err
    )]
    async fn list_managed_brands(
        &self,
        actor: UserUuid,
    ) -> Result<Vec<BrandRecord>, AdminServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let keys = self.brand_admins.list_brand_keys(&mut tx, actor).await?;
        let brands = self.brands.list_brands_by_keys(&mut tx, &keys).await?;

        tx.commit().await?;

        Ok(brands)
    }

    #[tracing::instrument(
        name = "admin.service.create_brand",
        skip(self, brand),
        fields(actor_uuid = %actor, brand_key = tracing::field::Empty),
        err
    )]
    async fn create_brand(
        &self,
        actor: UserUuid,
        brand: NewBrand,
    ) -> Result<BrandRecord, AdminServiceError> {
        let brand = NewBrand {
            key: normalize_brand_key(&brand.key),
            display_name: brand.display_name.trim().to_string(),
            categories: normalize_categories(&brand.categories),
            ..brand
        };

        validate_new_brand(&brand)?;

        Span::current().record("brand_key", brand.key.as_str());

        let mut tx = self.db.begin_transaction().await?;

        if self.brands.find_brand(&mut tx, &brand.key).await?.is_some() {
            return Err(AdminServiceError::AlreadyExists);
        }

        let record = self.brands.create_brand(&mut tx, brand).await?;

        self.brand_admins
            .add_brand_admin(&mut tx, actor, &record.key)
            .await?;

        self.users.set_admin_flag(&mut tx, actor, true).await?;

        tx.commit().await?;

        info!(brand_key = %record.key, "created brand");

        Ok(record)
    }

    #[tracing::instrument(
        name = "admin.service.update_brand",
        skip(self, update),
        fields(actor_uuid = %actor, brand_key = %brand_key),
        err
    )]
    async fn update_brand(
        &self,
        actor: UserUuid,
        brand_key: String,
        update: BrandUpdate,
    ) -> Result<BrandRecord, AdminServiceError> {
        let key = normalize_brand_key(&brand_key);

        let update = BrandUpdate {
            display_name: update.display_name.map(|name| name.trim().to_string()),
            categories: update.categories.map(|c| normalize_categories(&c)),
            ..update
        };

        if update.display_name.as_deref().is_some_and(str::is_empty) {
            return Err(AdminServiceError::Validation(
                "displayName must not be empty".to_string(),
            ));
        }

        let mut tx = self.db.begin_transaction().await?;

        self.ensure_brand_admin(&mut tx, actor, &key).await?;

        let record = self.brands.update_brand(&mut tx, &key, update).await?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "admin.service.list_stores",
        skip(self),
        fields(actor_uuid = %actor, brand_key = %brand_key),
        err
    )]
    async fn list_stores(
        &self,
        actor: UserUuid,
        brand_key: String,
    ) -> Result<Vec<StoreRecord>, AdminServiceError> {
        let key = normalize_brand_key(&brand_key);

        let mut tx = self.db.begin_transaction().await?;

        self.ensure_brand_admin(&mut tx, actor, &key).await?;

        let stores = self.stores.list_stores_by_brand(&mut tx, &key).await?;

        tx.commit().await?;

        Ok(stores)
    }

    #[tracing::instrument(
        name = "admin.service.create_store",
        skip(self, store),
        fields(actor_uuid = %actor, store_uuid = %store.uuid, brand_key = %store.brand_key),
        err
    )]
    async fn create_store(
        &self,
        actor: UserUuid,
        store: NewStore,
    ) -> Result<StoreRecord, AdminServiceError> {
        let store = NewStore {
            brand_key: normalize_brand_key(&store.brand_key),
            ..store
        };

        validate_new_store(&store)?;

        let mut tx = self.db.begin_transaction().await?;

        self.ensure_brand_admin(&mut tx, actor, &store.brand_key)
            .await?;

        let record = self.stores.create_store(&mut tx, store).await?;

        tx.commit().await?;

        self.tracking
            .record_event(
                TrackedEvent::admin(actor, AdminAction::EditStore)
                    .with_brand(record.brand_key.clone())
                    .with_store(record.uuid),
                Timestamp::now(),
            )
            .await;

        Ok(record)
    }

    #[tracing::instrument(
        name = "admin.service.update_store",
        skip(self, update),
        fields(actor_uuid = %actor, store_uuid = %store),
        err
    )]
    async fn update_store(
        &self,
        actor: UserUuid,
        store: StoreUuid,
        update: StoreUpdate,
    ) -> Result<StoreRecord, AdminServiceError> {
        let update = StoreUpdate {
            brand_key: update.brand_key.map(|key| normalize_brand_key(&key)),
            ..update
        };

        if update
            .name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(AdminServiceError::Validation(
                "name must not be empty".to_string(),
            ));
        }

        let mut tx = self.db.begin_transaction().await?;

        let existing = self
            .stores
            .find_store(&mut tx, store)
            .await?
            .ok_or(AdminServiceError::NotFound)?;

        self.ensure_brand_admin(&mut tx, actor, &existing.brand_key)
            .await?;

        if let Some(target) = update.brand_key.as_deref()
            && target != existing.brand_key
        {
            self.ensure_brand_admin(&mut tx, actor, target).await?;
        }

        let record = self.stores.update_store(&mut tx, store, update).await?;

        tx.commit().await?;

        self.tracking
            .record_event(
                TrackedEvent::admin(actor, AdminAction::EditStore)
                    .with_brand(record.brand_key.clone())
                    .with_store(record.uuid),
                Timestamp::now(),
            )
            .await;

        Ok(record)
    }

    #[tracing::instrument(
        name = "admin.service.list_promotions",
        skip(self),
        fields(actor_uuid = %actor, brand_key = %brand_key),
        err
    )]
    async fn list_promotions(
        &self,
        actor: UserUuid,
        brand_key: String,
    ) -> Result<Vec<PromotionRecord>, AdminServiceError> {
        let key = normalize_brand_key(&brand_key);

        let mut tx = self.db.begin_transaction().await?;

        self.ensure_brand_admin(&mut tx, actor, &key).await?;

        let promotions = self.promotions.list_brand_promotions(&mut tx, &key).await?;

        tx.commit().await?;

        Ok(promotions)
    }

    #[tracing::instrument(
        name = "admin.service.create_promotion",
        skip(self, promotion),
        fields(
            actor_uuid = %actor,
            promotion_uuid = %promotion.uuid,
            brand_key = %promotion.brand_key
        ),
        err
    )]
    async fn create_promotion(
        &self,
        actor: UserUuid,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, AdminServiceError> {
        let promotion = NewPromotion {
            brand_key: normalize_brand_key(&promotion.brand_key),
            title: promotion.title.trim().to_string(),
            ..promotion
        };

        validate_new_promotion(&promotion)?;

        let mut tx = self.db.begin_transaction().await?;

        self.ensure_brand_admin(&mut tx, actor, &promotion.brand_key)
            .await?;

        let record = self
            .promotions
            .create_promotion(&mut tx, promotion, Some(actor))
            .await?;

        tx.commit().await?;

        info!(promotion_uuid = %record.uuid, "created draft promotion");

        self.tracking
            .record_event(
                TrackedEvent::admin(actor, AdminAction::CreatePromo)
                    .with_brand(record.brand_key.clone())
                    .with_promotion(record.uuid),
                Timestamp::now(),
            )
            .await;

        Ok(record)
    }

    #[tracing::instrument(
        name = "admin.service.update_promotion",
        skip(self, update),
        fields(actor_uuid = %actor, promotion_uuid = %promotion),
        err
    )]
    async fn update_promotion(
        &self,
        actor: UserUuid,
        promotion: PromotionUuid,
        update: PromotionUpdate,
    ) -> Result<PromotionRecord, AdminServiceError> {
        let update = PromotionUpdate {
            title: update.title.map(|title| title.trim().to_string()),
            ..update
        };

        if update.title.as_deref().is_some_and(str::is_empty) {
            return Err(AdminServiceError::Validation(
                "title must not be empty".to_string(),
            ));
        }

        validate_update_limits(&update)?;

        let mut tx = self.db.begin_transaction().await?;

        let existing = self
            .lock_managed_promotion(&mut tx, actor, promotion)
            .await?;

        if !existing.status.is_editable() {
            return Err(AdminServiceError::NotEditable(existing.status));
        }

        validate_window(
            update.start_at.unwrap_or(existing.start_at),
            update.end_at.unwrap_or(existing.end_at),
        )?;

        let record = self
            .promotions
            .update_promotion(&mut tx, promotion, update)
            .await?;

        tx.commit().await?;

        self.tracking
            .record_event(
                TrackedEvent::admin(actor, AdminAction::UpdatePromo)
                    .with_brand(record.brand_key.clone())
                    .with_promotion(record.uuid),
                Timestamp::now(),
            )
            .await;

        Ok(record)
    }

    #[tracing::instrument(
        name = "admin.service.publish_promotion",
        skip(self),
        fields(actor_uuid = %actor, promotion_uuid = %promotion),
        err
    )]
    async fn publish_promotion(
        &self,
        actor: UserUuid,
        promotion: PromotionUuid,
    ) -> Result<PromotionRecord, AdminServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let existing = self
            .lock_managed_promotion(&mut tx, actor, promotion)
            .await?;

        if existing.status != PromotionStatus::Draft {
            return Err(AdminServiceError::InvalidTransition {
                from: existing.status,
                to: PromotionStatus::Published,
            });
        }

        let record = self
            .promotions
            .set_promotion_status(&mut tx, promotion, PromotionStatus::Published)
            .await?;

        tx.commit().await?;

        info!(promotion_uuid = %record.uuid, "published promotion");

        Ok(record)
    }

    #[tracing::instrument(
        name = "admin.service.cancel_promotion",
        skip(self),
        fields(actor_uuid = %actor, promotion_uuid = %promotion),
        err
    )]
    async fn cancel_promotion(
        &self,
        actor: UserUuid,
        promotion: PromotionUuid,
    ) -> Result<PromotionRecord, AdminServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let existing = self
            .lock_managed_promotion(&mut tx, actor, promotion)
            .await?;

        if existing.status == PromotionStatus::Canceled {
            tx.commit().await?;

            return Ok(existing);
        }

        let record = self
            .promotions
            .set_promotion_status(&mut tx, promotion, PromotionStatus::Canceled)
            .await?;

        tx.commit().await?;

        info!(promotion_uuid = %record.uuid, "canceled promotion");

        self.tracking
            .record_event(
                TrackedEvent::admin(actor, AdminAction::DeletePromo)
                    .with_brand(record.brand_key.clone())
                    .with_promotion(record.uuid),
                Timestamp::now(),
            )
            .await;

        Ok(record)
    }

    #[tracing::instrument(
        name = "admin.service.get_promotion_quota",
        skip(self),
        fields(actor_uuid = %actor, promotion_uuid = %promotion),
        err
    )]
    async fn get_promotion_quota(
        &self,
        actor: UserUuid,
        promotion: PromotionUuid,
        at: Timestamp,
    ) -> Result<PromotionQuota, AdminServiceError> {
        let (start, end) = history_window(at)?;

        let mut tx = self.db.begin_transaction().await?;

        let record = self
            .find_managed_promotion(&mut tx, actor, promotion)
            .await?;

        let totals = self.redemptions.get_usage_totals(&mut tx, promotion).await?;

        let daily = self
            .redemptions
            .list_daily_usage(&mut tx, promotion, start, end)
            .await?;

        tx.commit().await?;

        let stats = build_quota_stats(
            record.global_quota,
            record.daily_quota,
            totals.total_used,
            totals.distinct_users,
            daily,
        );

        Ok(PromotionQuota {
            promotion: record,
            stats,
        })
    }

    #[tracing::instrument(
        name = "admin.service.list_exclusions",
        skip(self),
        fields(actor_uuid = %actor, promotion_uuid = %promotion),
        err
    )]
    async fn list_exclusions(
        &self,
        actor: UserUuid,
        promotion: PromotionUuid,
    ) -> Result<Vec<ExclusionRecord>, AdminServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.find_managed_promotion(&mut tx, actor, promotion)
            .await?;

        let exclusions = self.exclusions.list_exclusions(&mut tx, promotion).await?;

        tx.commit().await?;

        Ok(exclusions)
    }

    #[tracing::instrument(
        name = "admin.service.replace_exclusions",
        skip(self, stores),
        fields(
            actor_uuid = %actor,
            promotion_uuid = %promotion,
            store_count = tracing::field::Empty
        ),
        err
    )]
    async fn replace_exclusions(
        &self,
        actor: UserUuid,
        promotion: PromotionUuid,
        stores: Vec<StoreUuid>,
    ) -> Result<Vec<ExclusionRecord>, AdminServiceError> {
        let mut stores = stores;

        stores.sort_unstable();
        stores.dedup();

        Span::current().record("store_count", stores.len());

        let mut tx = self.db.begin_transaction().await?;

        let record = self
            .lock_managed_promotion(&mut tx, actor, promotion)
            .await?;

        let owned = self
            .stores
            .count_brand_stores(&mut tx, &record.brand_key, &stores)
            .await?;

        if usize::try_from(owned).ok() != Some(stores.len()) {
            return Err(AdminServiceError::Validation(format!(
                "every store must belong to brand {}",
                record.brand_key
            )));
        }

        let exclusions = self
            .exclusions
            .replace_exclusions(&mut tx, promotion, &stores)
            .await?;

        tx.commit().await?;

        Ok(exclusions)
    }
}

#[automock]
#[async_trait]
pub trait AdminService: Send + Sync {
    /// Brands the actor administers.
    async fn list_managed_brands(&self, actor: UserUuid)
    -> Result<Vec<BrandRecord>, AdminServiceError>;

    /// Create a brand, make the actor its administrator and raise the
    /// actor's admin flag.
    async fn create_brand(
        &self,
        actor: UserUuid,
        brand: NewBrand,
    ) -> Result<BrandRecord, AdminServiceError>;

    async fn update_brand(
        &self,
        actor: UserUuid,
        brand_key: String,
        update: BrandUpdate,
    ) -> Result<BrandRecord, AdminServiceError>;

    async fn list_stores(
        &self,
        actor: UserUuid,
        brand_key: String,
    ) -> Result<Vec<StoreRecord>, AdminServiceError>;

    async fn create_store(
        &self,
        actor: UserUuid,
        store: NewStore,
    ) -> Result<StoreRecord, AdminServiceError>;

    /// Update a store. Moving it to another brand needs admin rights on both.
    async fn update_store(
        &self,
        actor: UserUuid,
        store: StoreUuid,
        update: StoreUpdate,
    ) -> Result<StoreRecord, AdminServiceError>;

    /// Every promotion of a brand, drafts and canceled ones included.
    async fn list_promotions(
        &self,
        actor: UserUuid,
        brand_key: String,
    ) -> Result<Vec<PromotionRecord>, AdminServiceError>;

    /// Create a promotion in the `Draft` state.
    async fn create_promotion(
        &self,
        actor: UserUuid,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, AdminServiceError>;

    /// Edit a draft. Published and canceled promotions are rejected.
    async fn update_promotion(
        &self,
        actor: UserUuid,
        promotion: PromotionUuid,
        update: PromotionUpdate,
    ) -> Result<PromotionRecord, AdminServiceError>;

    /// Move a draft to `Published`.
    async fn publish_promotion(
        &self,
        actor: UserUuid,
        promotion: PromotionUuid,
    ) -> Result<PromotionRecord, AdminServiceError>;

    /// Move a promotion to `Canceled`. Canceling twice returns the promotion
    /// unchanged.
    async fn cancel_promotion(
        &self,
        actor: UserUuid,
        promotion: PromotionUuid,
    ) -> Result<PromotionRecord, AdminServiceError>;

    /// Quota consumption, with a daily histogram covering the 30 UTC days
    /// ending on the day containing `at`.
    async fn get_promotion_quota(
        &self,
        actor: UserUuid,
        promotion: PromotionUuid,
        at: Timestamp,
    ) -> Result<PromotionQuota, AdminServiceError>;

    async fn list_exclusions(
        &self,
        actor: UserUuid,
        promotion: PromotionUuid,
    ) -> Result<Vec<ExclusionRecord>, AdminServiceError>;

    /// Replace the whole exclusion set. Every store must belong to the
    /// promotion's brand.
    async fn replace_exclusions(
        &self,
        actor: UserUuid,
        promotion: PromotionUuid,
        stores: Vec<StoreUuid>,
    ) -> Result<Vec<ExclusionRecord>, AdminServiceError>;
}
