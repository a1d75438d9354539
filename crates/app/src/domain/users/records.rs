//! User Records

use jiff::Timestamp;

use crate::{
    domain::{promotions::records::PromotionUuid, redemptions::records::UsageSummary},
    uuids::TypedUuid,
};

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// User Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A user together with their stored password hash.
#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub user: UserRecord,
    pub password_hash: String,
}

/// Everything the profile page shows about a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user: UserRecord,
    pub brand_favorites: Vec<String>,
    pub promotion_favorites: Vec<PromotionUuid>,
    pub admin_brands: Vec<String>,
    pub usage: Vec<UsageSummary>,
}
