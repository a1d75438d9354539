//! User Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use promoradar_app::domain::users::records::{UserProfile, UserRecord};

use crate::responses::UsageResponse;

/// User Response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserResponse {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            user_id: user.uuid.into_uuid(),
            username: user.username,
            email: user.email,
            is_admin: user.is_admin,
        }
    }
}

/// Profile Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProfileResponse {
    pub user: UserResponse,
    pub brand_favorites: Vec<String>,
    pub promotion_favorites: Vec<Uuid>,
    pub admin_brands: Vec<String>,
    pub usage: Vec<UsageResponse>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            user: profile.user.into(),
            brand_favorites: profile.brand_favorites,
            promotion_favorites: profile
                .promotion_favorites
                .into_iter()
                .map(|uuid| uuid.into_uuid())
                .collect(),
            admin_brands: profile.admin_brands,
            usage: profile.usage.into_iter().map(Into::into).collect(),
        }
    }
}

/// Brand key list, used for favorites and managed brands.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BrandNamesResponse {
    pub items: Vec<String>,
}

/// Favorite promotion ids.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromotionIdsResponse {
    pub items: Vec<Uuid>,
}
