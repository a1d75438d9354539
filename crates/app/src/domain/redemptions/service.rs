//! Redemptions Service

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        promotions::{
            PgPromotionsRepository,
            records::{PromotionStatus, PromotionUuid},
        },
        redemptions::{
            PgRedemptionsRepository, RedemptionsServiceError,
            data::{NewRedemption, utc_day_bounds},
            records::{LimitKind, RankingEntry, RedemptionUuid, UsageSummary},
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgRedemptionsService {
    db: Db,
    promotions: PgPromotionsRepository,
    redemptions: PgRedemptionsRepository,
}

impl PgRedemptionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            promotions: PgPromotionsRepository::new(),
            redemptions: PgRedemptionsRepository::new(),
        }
    }
}

#[async_trait]
impl RedemptionsService for PgRedemptionsService {
    #[tracing::instrument(
        name = "redemptions.service.claim",
        skip(self),
        fields(
            user_uuid = %user,
            promotion_uuid = %promotion,
            redemption_uuid = tracing::field::Empty,
            usage_count = tracing::field::Empty
        ),
        err
    )]
    async fn claim(
        &self,
        user: UserUuid,
        promotion: PromotionUuid,
        at: Timestamp,
    ) -> Result<UsageSummary, RedemptionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self
            .promotions
            .lock_promotion(&mut tx, promotion)
            .await?
            .filter(|record| record.status == PromotionStatus::Published)
            .ok_or(RedemptionsServiceError::NotFound)?;

        if !record.is_active_at(at) {
            return Err(RedemptionsServiceError::NotActive);
        }

        if record.per_user_limit > 0 {
            let used = self
                .redemptions
                .count_user_redemptions(&mut tx, user, promotion)
                .await?;

            if used >= u64::from(record.per_user_limit) {
                return Err(RedemptionsServiceError::LimitReached(LimitKind::PerUser));
            }
        }

        if let Some(daily_quota) = record.daily_quota {
            let (start, end) = utc_day_bounds(at)?;

            let used_today = self
                .redemptions
                .count_redemptions_between(&mut tx, promotion, start, end)
                .await?;

            if used_today >= u64::from(daily_quota) {
                return Err(RedemptionsServiceError::LimitReached(LimitKind::Daily));
            }
        }

        if let Some(global_quota) = record.global_quota {
            let used = self.redemptions.count_redemptions(&mut tx, promotion).await?;

            if used >= u64::from(global_quota) {
                return Err(RedemptionsServiceError::LimitReached(LimitKind::Global));
            }
        }

        let redemption = self
            .redemptions
            .create_redemption(
                &mut tx,
                NewRedemption {
                    uuid: RedemptionUuid::new(),
                    user_uuid: user,
                    promotion_uuid: promotion,
                    created_at: at,
                },
            )
            .await?;

        let usage = self
            .redemptions
            .get_user_usage(&mut tx, user, promotion)
            .await?;

        tx.commit().await?;

        let span = Span::current();

        span.record("redemption_uuid", tracing::field::display(redemption.uuid));
        span.record("usage_count", usage.count);

        info!(redemption_uuid = %redemption.uuid, "claimed promotion");

        Ok(usage)
    }

    #[tracing::instrument(
        name = "redemptions.service.list_usage",
        skip(self),
        fields(user_uuid = %user),
        err
    )]
    async fn list_usage(&self, user: UserUuid) -> Result<Vec<UsageSummary>, RedemptionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let usage = self.redemptions.list_user_usage(&mut tx, user).await?;

        tx.commit().await?;

        Ok(usage)
    }

    #[tracing::instrument(name = "redemptions.service.list_rankings", skip(self), err)]
    async fn list_rankings(&self, limit: u32) -> Result<Vec<RankingEntry>, RedemptionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rankings = self.redemptions.list_rankings(&mut tx, limit).await?;

        tx.commit().await?;

        Ok(rankings)
    }
}

#[automock]
#[async_trait]
pub trait RedemptionsService: Send + Sync {
    /// Claim a published promotion on behalf of `user` at instant `at`.
    ///
    /// The promotion row stays locked for the whole check-and-insert so
    /// concurrent claims of the same promotion run one after another. Caps
    /// are checked per user first, then per UTC day, then globally.
    ///
    /// Returns the user's updated usage of the promotion.
    async fn claim(
        &self,
        user: UserUuid,
        promotion: PromotionUuid,
        at: Timestamp,
    ) -> Result<UsageSummary, RedemptionsServiceError>;

    /// A user's usage of every promotion they have claimed, most recent first.
    async fn list_usage(&self, user: UserUuid) -> Result<Vec<UsageSummary>, RedemptionsServiceError>;

    /// The top `limit` users by total claims.
    async fn list_rankings(&self, limit: u32) -> Result<Vec<RankingEntry>, RedemptionsServiceError>;
}
