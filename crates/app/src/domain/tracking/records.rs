//! Behaviour Event Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    domain::{promotions::records::PromotionUuid, stores::records::StoreUuid},
    uuids::TypedUuid,
};

/// Behaviour Event UUID
pub type BehaviorEventUuid = TypedUuid<BehaviorEventRecord>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action: {0}")]
pub struct UnknownAction(pub String);

/// Who produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorKind {
    User,
    Admin,
}

impl BehaviorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for BehaviorKind {
    type Err = UnknownAction;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

/// Interactions a shopper can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    ClickPromo,
    ViewPromo,
    Search,
    Filter,
    OpenMap,
    OpenBrand,
    ScrollList,
}

impl UserAction {
    pub const ALL: [Self; 7] = [
        Self::ClickPromo,
        Self::ViewPromo,
        Self::Search,
        Self::Filter,
        Self::OpenMap,
        Self::OpenBrand,
        Self::ScrollList,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClickPromo => "click_promo",
            Self::ViewPromo => "view_promo",
            Self::Search => "search",
            Self::Filter => "filter",
            Self::OpenMap => "open_map",
            Self::OpenBrand => "open_brand",
            Self::ScrollList => "scroll_list",
        }
    }
}

impl fmt::Display for UserAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserAction {
    type Err = UnknownAction;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| UnknownAction(value.to_string()))
    }
}

/// Changes made through the admin surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    CreatePromo,
    UpdatePromo,
    DeletePromo,
    EditStore,
}

impl AdminAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatePromo => "create_promo",
            Self::UpdatePromo => "update_promo",
            Self::DeletePromo => "delete_promo",
            Self::EditStore => "edit_store",
        }
    }
}

impl fmt::Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Behaviour Event Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BehaviorEventRecord {
    pub uuid: BehaviorEventUuid,
    /// A user id, or `guest_<ip>_<millis>` for anonymous visitors.
    pub actor: String,
    pub kind: BehaviorKind,
    pub action: String,
    pub promotion_uuid: Option<PromotionUuid>,
    pub brand_key: Option<String>,
    pub store_uuid: Option<StoreUuid>,
    pub search_keyword: Option<String>,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
}
