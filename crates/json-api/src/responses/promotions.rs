//! Promotion Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use promoradar_app::domain::promotions::records::{
    Dataset, ExclusionRecord, PromotionDetail, PromotionRecord,
};

use crate::responses::{BrandResponse, StoreResponse};

/// Promotion Response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromotionResponse {
    pub promo_id: Uuid,
    pub brand_name: String,
    pub title: String,
    pub description: String,
    pub promo_type: String,
    pub event_tag: String,
    pub start_datetime: String,
    pub end_datetime: String,
    pub need_membership: bool,
    pub need_code: bool,
    /// Claims allowed per user, `0` meaning unlimited
    pub per_user_limit: u32,
    pub global_quota: Option<u32>,
    pub daily_quota: Option<u32>,
    pub stacking_rule: Option<String>,
    /// One of `Draft`, `Published` or `Canceled`
    pub status: String,
    pub creator_id: Option<Uuid>,
    pub last_updated: String,
}

impl From<PromotionRecord> for PromotionResponse {
    fn from(promotion: PromotionRecord) -> Self {
        Self {
            promo_id: promotion.uuid.into_uuid(),
            brand_name: promotion.brand_key,
            title: promotion.title,
            description: promotion.description,
            promo_type: promotion.promo_type.to_string(),
            event_tag: promotion.event_tag.to_string(),
            start_datetime: promotion.start_at.to_string(),
            end_datetime: promotion.end_at.to_string(),
            need_membership: promotion.need_membership,
            need_code: promotion.need_code,
            per_user_limit: promotion.per_user_limit,
            global_quota: promotion.global_quota,
            daily_quota: promotion.daily_quota,
            stacking_rule: promotion.stacking_rule,
            status: promotion.status.to_string(),
            creator_id: promotion.creator_uuid.map(|uuid| uuid.into_uuid()),
            last_updated: promotion.updated_at.to_string(),
        }
    }
}

/// Promotion List Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromotionListResponse {
    pub items: Vec<PromotionResponse>,
}

impl From<Vec<PromotionRecord>> for PromotionListResponse {
    fn from(promotions: Vec<PromotionRecord>) -> Self {
        Self {
            items: promotions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Store Exclusion Response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExclusionResponse {
    pub promo_id: Uuid,
    pub store_id: Uuid,
    pub reason: Option<String>,
}

impl From<ExclusionRecord> for ExclusionResponse {
    fn from(exclusion: ExclusionRecord) -> Self {
        Self {
            promo_id: exclusion.promotion_uuid.into_uuid(),
            store_id: exclusion.store_uuid.into_uuid(),
            reason: exclusion.reason,
        }
    }
}

/// Exclusion List Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ExclusionListResponse {
    pub items: Vec<ExclusionResponse>,
}

impl From<Vec<ExclusionRecord>> for ExclusionListResponse {
    fn from(exclusions: Vec<ExclusionRecord>) -> Self {
        Self {
            items: exclusions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Promotion Detail Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromotionDetailResponse {
    pub promotion: PromotionResponse,
    /// Every store of the promotion's brand
    pub stores: Vec<StoreResponse>,
    pub exclusions: Vec<ExclusionResponse>,
}

impl From<PromotionDetail> for PromotionDetailResponse {
    fn from(detail: PromotionDetail) -> Self {
        Self {
            promotion: detail.promotion.into(),
            stores: detail.stores.into_iter().map(Into::into).collect(),
            exclusions: detail.exclusions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Dataset Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DatasetResponse {
    pub promotions: Vec<PromotionResponse>,
    pub stores: Vec<StoreResponse>,
    pub exclusions: Vec<ExclusionResponse>,
    pub brands: Vec<BrandResponse>,
}

impl From<Dataset> for DatasetResponse {
    fn from(dataset: Dataset) -> Self {
        Self {
            promotions: dataset.promotions.into_iter().map(Into::into).collect(),
            stores: dataset.stores.into_iter().map(Into::into).collect(),
            exclusions: dataset.exclusions.into_iter().map(Into::into).collect(),
            brands: dataset.brands.into_iter().map(Into::into).collect(),
        }
    }
}
