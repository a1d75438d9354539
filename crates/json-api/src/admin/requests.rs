//! Admin request bodies and their conversion into service data.

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use promoradar_app::domain::{
    brands::data::{BrandUpdate, NewBrand},
    promotions::{
        data::{NewPromotion, PromotionUpdate},
        records::{EventTag, PromoType, PromotionUuid},
    },
    stores::{
        data::{NewStore, StoreUpdate},
        records::StoreUuid,
    },
};

use crate::extensions::*;

/// `?brandName=` scope shared by the admin list endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BrandScope {
    pub brand_name: Option<String>,
}

impl BrandScope {
    pub(crate) fn brand_name(self) -> Result<String, StatusError> {
        self.brand_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| StatusError::bad_request().brief("brandName is required"))
    }
}

/// Distinguishes an absent field from an explicit `null`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn parse_timestamp(value: &str, field: &str) -> Result<Timestamp, StatusError> {
    value
        .trim()
        .parse::<Timestamp>()
        .or_400(&format!("{field} must be an RFC 3339 timestamp"))
}

fn parse_wire<T>(value: &str) -> Result<T, StatusError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|error| StatusError::bad_request().brief(error.to_string()))
}

/// Create Brand Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateBrandRequest {
    /// Lookup key, trimmed and lowercased on save
    pub key: String,
    pub display_name: String,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub text_color: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl From<CreateBrandRequest> for NewBrand {
    fn from(request: CreateBrandRequest) -> Self {
        NewBrand {
            key: request.key,
            display_name: request.display_name,
            logo_url: request.logo_url,
            primary_color: request.primary_color,
            secondary_color: request.secondary_color,
            text_color: request.text_color,
            categories: request.categories,
        }
    }
}

/// Update Brand Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateBrandRequest {
    pub display_name: Option<String>,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub text_color: Option<String>,
    /// Replaces every category when present
    pub categories: Option<Vec<String>>,
}

impl From<UpdateBrandRequest> for BrandUpdate {
    fn from(request: UpdateBrandRequest) -> Self {
        BrandUpdate {
            display_name: request.display_name,
            logo_url: request.logo_url,
            primary_color: request.primary_color,
            secondary_color: request.secondary_color,
            text_color: request.text_color,
            categories: request.categories,
        }
    }
}

/// Create Store Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateStoreRequest {
    pub brand_name: String,
    pub name: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub region: String,
}

impl From<CreateStoreRequest> for NewStore {
    fn from(request: CreateStoreRequest) -> Self {
        NewStore {
            uuid: StoreUuid::new(),
            brand_key: request.brand_name,
            name: request.name,
            address: request.address,
            lat: request.lat,
            lng: request.lng,
            region: request.region,
        }
    }
}

/// Update Store Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateStoreRequest {
    /// Moves the store to another brand
    pub brand_name: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub region: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateStoreRequest> for StoreUpdate {
    fn from(request: UpdateStoreRequest) -> Self {
        StoreUpdate {
            brand_key: request.brand_name,
            name: request.name,
            address: request.address,
            lat: request.lat,
            lng: request.lng,
            region: request.region,
            is_active: request.is_active,
        }
    }
}

/// Create Promotion Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePromotionRequest {
    pub brand_name: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Wire name such as `Buy1Get1`, `Second_Cup` or `Discount`
    pub promo_type: String,
    /// Wire name such as `Holiday` or `LimitedTime`
    pub event_tag: String,
    pub start_datetime: String,
    pub end_datetime: String,
    #[serde(default)]
    pub need_membership: bool,
    #[serde(default)]
    pub need_code: bool,
    /// `0` means unlimited
    #[serde(default)]
    pub per_user_limit: u32,
    pub global_quota: Option<u32>,
    pub daily_quota: Option<u32>,
    pub stacking_rule: Option<String>,
}

impl CreatePromotionRequest {
    pub(crate) fn into_new_promotion(self) -> Result<NewPromotion, StatusError> {
        Ok(NewPromotion {
            uuid: PromotionUuid::new(),
            brand_key: self.brand_name,
            title: self.title,
            description: self.description,
            promo_type: parse_wire::<PromoType>(&self.promo_type)?,
            event_tag: parse_wire::<EventTag>(&self.event_tag)?,
            start_at: parse_timestamp(&self.start_datetime, "startDatetime")?,
            end_at: parse_timestamp(&self.end_datetime, "endDatetime")?,
            need_membership: self.need_membership,
            need_code: self.need_code,
            per_user_limit: self.per_user_limit,
            global_quota: self.global_quota,
            daily_quota: self.daily_quota,
            stacking_rule: self.stacking_rule,
        })
    }
}

/// Update Promotion Request
///
/// Absent fields are left unchanged. `null` clears `globalQuota`,
/// `dailyQuota` and `stackingRule`.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdatePromotionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub promo_type: Option<String>,
    pub event_tag: Option<String>,
    pub start_datetime: Option<String>,
    pub end_datetime: Option<String>,
    pub need_membership: Option<bool>,
    pub need_code: Option<bool>,
    pub per_user_limit: Option<u32>,
    #[serde(default, deserialize_with = "nullable")]
    pub global_quota: Option<Option<u32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub daily_quota: Option<Option<u32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub stacking_rule: Option<Option<String>>,
}

impl UpdatePromotionRequest {
    pub(crate) fn into_update(self) -> Result<PromotionUpdate, StatusError> {
        Ok(PromotionUpdate {
            title: self.title,
            description: self.description,
            promo_type: self.promo_type.as_deref().map(parse_wire).transpose()?,
            event_tag: self.event_tag.as_deref().map(parse_wire).transpose()?,
            start_at: self
                .start_datetime
                .as_deref()
                .map(|value| parse_timestamp(value, "startDatetime"))
                .transpose()?,
            end_at: self
                .end_datetime
                .as_deref()
                .map(|value| parse_timestamp(value, "endDatetime"))
                .transpose()?,
            need_membership: self.need_membership,
            need_code: self.need_code,
            per_user_limit: self.per_user_limit,
            global_quota: self.global_quota,
            daily_quota: self.daily_quota,
            stacking_rule: self.stacking_rule,
        })
    }
}

/// Replace Exclusions Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReplaceExclusionsRequest {
    pub store_ids: Vec<Uuid>,
}

impl ReplaceExclusionsRequest {
    pub(crate) fn into_store_uuids(self) -> Vec<StoreUuid> {
        self.store_ids.into_iter().map(StoreUuid::from).collect()
    }
}
