//! Promotions Service

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashSet;
use tracing::Span;

use crate::{
    catalog::{CatalogIndex, CatalogSort},
    database::Db,
    domain::{
        brands::{PgBrandsRepository, data::normalize_brand_key},
        promotions::{
            PromotionsServiceError,
            data::PromotionFilter,
            records::{Dataset, PromotionDetail, PromotionRecord, PromotionStatus, PromotionUuid},
            repositories::{PgExclusionsRepository, PgPromotionsRepository},
        },
        stores::PgStoresRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgPromotionsService {
    db: Db,
    promotions: PgPromotionsRepository,
    exclusions: PgExclusionsRepository,
    stores: PgStoresRepository,
    brands: PgBrandsRepository,
}

impl PgPromotionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            promotions: PgPromotionsRepository::new(),
            exclusions: PgExclusionsRepository::new(),
            stores: PgStoresRepository::new(),
            brands: PgBrandsRepository::new(),
        }
    }
}

#[async_trait]
impl PromotionsService for PgPromotionsService {
    #[tracing::instrument(
        name = "promotions.service.list_promotions",
        skip(self, filter),
        fields(
            only_active = filter.only_active,
            has_search = filter.search_term().is_some(),
            result_count = tracing::field::Empty
        ),
        err
    )]
    async fn list_promotions(
        &self,
        filter: PromotionFilter,
        at: Timestamp,
    ) -> Result<Vec<PromotionRecord>, PromotionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let promotions = self
            .promotions
            .list_published_promotions(&mut tx, &filter, at)
            .await?;

        tx.commit().await?;

        Span::current().record("result_count", promotions.len());

        Ok(promotions)
    }

    #[tracing::instrument(
        name = "promotions.service.browse_promotions",
        skip(self, filter, followed),
        fields(
            sort = %sort,
            followed_count = followed.len(),
            result_count = tracing::field::Empty
        ),
        err
    )]
    async fn browse_promotions(
        &self,
        filter: PromotionFilter,
        sort: CatalogSort,
        followed: Vec<String>,
        at: Timestamp,
    ) -> Result<Vec<PromotionRecord>, PromotionsServiceError> {
        let dataset = self.get_dataset().await?;
        let index = CatalogIndex::build(dataset);

        let followed: FxHashSet<String> = followed
            .iter()
            .map(|key| normalize_brand_key(key))
            .filter(|key| !key.is_empty())
            .collect();

        let promotions: Vec<PromotionRecord> = index
            .browse(&filter, sort, &followed, at)
            .into_iter()
            .cloned()
            .collect();

        Span::current().record("result_count", promotions.len());

        Ok(promotions)
    }

    #[tracing::instrument(name = "promotions.service.get_dataset", skip(self), err)]
    async fn get_dataset(&self) -> Result<Dataset, PromotionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let promotions = self.promotions.list_all_published_promotions(&mut tx).await?;
        let stores = self.stores.list_stores(&mut tx).await?;
        let exclusions = self.exclusions.list_published_exclusions(&mut tx).await?;
        let brands = self.brands.list_brands(&mut tx).await?;

        tx.commit().await?;

        Ok(Dataset {
            promotions,
            stores,
            exclusions,
            brands,
        })
    }

    #[tracing::instrument(
        name = "promotions.service.get_promotion_detail",
        skip(self),
        fields(promotion_uuid = %promotion),
        err
    )]
    async fn get_promotion_detail(
        &self,
        promotion: PromotionUuid,
    ) -> Result<PromotionDetail, PromotionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self
            .promotions
            .find_promotion(&mut tx, promotion)
            .await?
            .filter(|record| record.status == PromotionStatus::Published)
            .ok_or(PromotionsServiceError::NotFound)?;

        let stores = self
            .stores
            .list_stores_by_brand(&mut tx, &record.brand_key)
            .await?;

        let exclusions = self.exclusions.list_exclusions(&mut tx, promotion).await?;

        tx.commit().await?;

        Ok(PromotionDetail {
            promotion: record,
            stores,
            exclusions,
        })
    }
}

#[automock]
#[async_trait]
pub trait PromotionsService: Send + Sync {
    /// List published promotions matching `filter`, soonest ending first.
    ///
    /// `at` is the instant used for the `only_active` window check.
    async fn list_promotions(
        &self,
        filter: PromotionFilter,
        at: Timestamp,
    ) -> Result<Vec<PromotionRecord>, PromotionsServiceError>;

    /// Filter and sort the published catalog in memory.
    ///
    /// Promotions of the `followed` brands are listed first.
    async fn browse_promotions(
        &self,
        filter: PromotionFilter,
        sort: CatalogSort,
        followed: Vec<String>,
        at: Timestamp,
    ) -> Result<Vec<PromotionRecord>, PromotionsServiceError>;

    /// Everything needed to browse offline: published promotions, every
    /// store, their exclusions and brand metadata.
    async fn get_dataset(&self) -> Result<Dataset, PromotionsServiceError>;

    /// A published promotion with its brand's stores and its exclusions.
    ///
    /// Drafts and canceled promotions are reported as [`PromotionsServiceError::NotFound`].
    async fn get_promotion_detail(
        &self,
        promotion: PromotionUuid,
    ) -> Result<PromotionDetail, PromotionsServiceError>;
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::{
        domain::{
            admin::AdminService,
            promotions::{data::NewPromotion, records::EventTag},
        },
        test::{
            TestContext,
            helpers::{
                create_brand, create_draft, create_published, create_store, create_user, hours,
                new_promotion, noon,
            },
        },
    };

    use super::*;

    #[tokio::test]
    async fn list_promotions_hides_drafts_and_canceled() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = create_user(&ctx, "owner").await;
        create_brand(&ctx, owner.uuid, "Cafe").await;

        let live = create_published(&ctx, owner.uuid, new_promotion("cafe", "Live")).await;
        create_draft(&ctx, owner.uuid, new_promotion("cafe", "Draft")).await;
        let gone = create_published(&ctx, owner.uuid, new_promotion("cafe", "Gone")).await;
        ctx.admin.cancel_promotion(owner.uuid, gone.uuid).await?;

        let promotions = ctx
            .promotions
            .list_promotions(PromotionFilter::default(), noon())
            .await?;

        assert_eq!(
            promotions.iter().map(|p| p.uuid).collect::<Vec<_>>(),
            vec![live.uuid]
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_promotions_applies_filters() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = create_user(&ctx, "owner").await;
        create_brand(&ctx, owner.uuid, "Cafe").await;
        create_brand(&ctx, owner.uuid, "Tea").await;

        let latte = create_published(&ctx, owner.uuid, new_promotion("cafe", "50% Latte")).await;
        let oolong = create_published(
            &ctx,
            owner.uuid,
            NewPromotion {
                event_tag: EventTag::Holiday,
                need_membership: true,
                ..new_promotion("tea", "Oolong")
            },
        )
        .await;
        let expired = create_published(
            &ctx,
            owner.uuid,
            NewPromotion {
                start_at: hours(noon(), -72),
                end_at: hours(noon(), -48),
                ..new_promotion("tea", "Old oolong")
            },
        )
        .await;

        let by_search = ctx
            .promotions
            .list_promotions(
                PromotionFilter {
                    search: Some("50%".to_string()),
                    ..PromotionFilter::default()
                },
                noon(),
            )
            .await?;

        assert_eq!(
            by_search.iter().map(|p| p.uuid).collect::<Vec<_>>(),
            vec![latte.uuid]
        );

        let by_brand = ctx
            .promotions
            .list_promotions(
                PromotionFilter {
                    brand_keys: smallvec![" TEA ".to_string()],
                    ..PromotionFilter::default()
                },
                noon(),
            )
            .await?;

        assert_eq!(
            by_brand.iter().map(|p| p.uuid).collect::<Vec<_>>(),
            vec![expired.uuid, oolong.uuid]
        );

        let active_members = ctx
            .promotions
            .list_promotions(
                PromotionFilter {
                    only_active: true,
                    need_membership: Some(true),
                    event_tags: smallvec![EventTag::Holiday],
                    ..PromotionFilter::default()
                },
                noon(),
            )
            .await?;

        assert_eq!(
            active_members.iter().map(|p| p.uuid).collect::<Vec<_>>(),
            vec![oolong.uuid]
        );

        Ok(())
    }

    #[tokio::test]
    async fn detail_includes_stores_and_exclusions() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = create_user(&ctx, "owner").await;
        create_brand(&ctx, owner.uuid, "Cafe").await;

        let main = create_store(&ctx, owner.uuid, "cafe", "Main").await;
        create_store(&ctx, owner.uuid, "cafe", "Annex").await;

        let promotion = create_published(&ctx, owner.uuid, new_promotion("cafe", "Latte")).await;
        ctx.admin
            .replace_exclusions(owner.uuid, promotion.uuid, vec![main.uuid])
            .await?;

        let detail = ctx.promotions.get_promotion_detail(promotion.uuid).await?;

        assert_eq!(detail.promotion.uuid, promotion.uuid);
        assert_eq!(detail.stores.len(), 2);
        assert_eq!(detail.exclusions.len(), 1);
        assert_eq!(detail.exclusions[0].store_uuid, main.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn detail_of_draft_is_not_found() {
        let ctx = TestContext::new().await;
        let owner = create_user(&ctx, "owner").await;
        create_brand(&ctx, owner.uuid, "Cafe").await;

        let draft = create_draft(&ctx, owner.uuid, new_promotion("cafe", "Latte")).await;

        let result = ctx.promotions.get_promotion_detail(draft.uuid).await;

        assert!(
            matches!(result, Err(PromotionsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn dataset_and_browse_cover_published_catalog() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = create_user(&ctx, "owner").await;
        create_brand(&ctx, owner.uuid, "Cafe").await;
        create_brand(&ctx, owner.uuid, "Tea").await;
        create_store(&ctx, owner.uuid, "cafe", "Main").await;

        let latte = create_published(&ctx, owner.uuid, new_promotion("cafe", "Latte")).await;
        let oolong = create_published(
            &ctx,
            owner.uuid,
            NewPromotion {
                end_at: hours(noon(), 2),
                ..new_promotion("tea", "Oolong")
            },
        )
        .await;
        create_draft(&ctx, owner.uuid, new_promotion("cafe", "Draft")).await;

        let dataset = ctx.promotions.get_dataset().await?;

        assert_eq!(dataset.promotions.len(), 2);
        assert_eq!(dataset.brands.len(), 2);
        assert_eq!(dataset.stores.len(), 1);

        let soonest = ctx
            .promotions
            .browse_promotions(PromotionFilter::default(), CatalogSort::SoonestEnd, Vec::new(), noon())
            .await?;

        assert_eq!(
            soonest.iter().map(|p| p.uuid).collect::<Vec<_>>(),
            vec![oolong.uuid, latte.uuid]
        );

        let followed = ctx
            .promotions
            .browse_promotions(
                PromotionFilter::default(),
                CatalogSort::SoonestEnd,
                vec!["Cafe".to_string()],
                noon(),
            )
            .await?;

        assert_eq!(
            followed.iter().map(|p| p.uuid).collect::<Vec<_>>(),
            vec![latte.uuid, oolong.uuid]
        );

        Ok(())
    }
}
