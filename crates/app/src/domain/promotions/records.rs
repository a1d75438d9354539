//! Promotions Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    domain::{
        brands::records::BrandRecord,
        stores::records::{StoreRecord, StoreUuid},
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Promotion UUID
pub type PromotionUuid = TypedUuid<PromotionRecord>;

/// A string did not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Promotion lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionStatus {
    Draft,
    Published,
    Canceled,
}

impl PromotionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Published => "Published",
            Self::Canceled => "Canceled",
        }
    }

    /// Draft moves to Published or Canceled, Published only to Canceled.
    /// Canceled is terminal.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Published | Self::Canceled) | (Self::Published, Self::Canceled)
        )
    }

    #[must_use]
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Draft)
    }
}

impl fmt::Display for PromotionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromotionStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Draft" => Ok(Self::Draft),
            "Published" => Ok(Self::Published),
            "Canceled" => Ok(Self::Canceled),
            _ => Err(UnknownVariant::new("promotion status", value)),
        }
    }
}

/// Kind of offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromoType {
    Buy1Get1,
    Discount,
    SecondCup,
    SpecialPrice,
    GiftWithPurchase,
    LimitedOffer,
    Seasonal,
    Other,
}

impl PromoType {
    pub const ALL: [Self; 8] = [
        Self::Buy1Get1,
        Self::Discount,
        Self::SecondCup,
        Self::SpecialPrice,
        Self::GiftWithPurchase,
        Self::LimitedOffer,
        Self::Seasonal,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy1Get1 => "Buy1Get1",
            Self::Discount => "Discount",
            Self::SecondCup => "Second_Cup",
            Self::SpecialPrice => "Special_Price",
            Self::GiftWithPurchase => "Gift_With_Purchase",
            Self::LimitedOffer => "Limited_Offer",
            Self::Seasonal => "Seasonal",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for PromoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromoType {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| UnknownVariant::new("promotion type", value))
    }
}

/// Campaign tag used for browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTag {
    Seasonal,
    Holiday,
    Membership,
    LimitedTime,
}

impl EventTag {
    pub const ALL: [Self; 4] = [
        Self::Seasonal,
        Self::Holiday,
        Self::Membership,
        Self::LimitedTime,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Seasonal => "Seasonal",
            Self::Holiday => "Holiday",
            Self::Membership => "Membership",
            Self::LimitedTime => "LimitedTime",
        }
    }
}

impl fmt::Display for EventTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventTag {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == value)
            .ok_or_else(|| UnknownVariant::new("event tag", value))
    }
}

/// Promotion Record
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionRecord {
    pub uuid: PromotionUuid,
    pub brand_key: String,
    pub title: String,
    pub description: String,
    pub promo_type: PromoType,
    pub event_tag: EventTag,
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    pub need_membership: bool,
    pub need_code: bool,
    /// Maximum claims per user, `0` meaning unlimited.
    pub per_user_limit: u32,
    pub global_quota: Option<u32>,
    pub daily_quota: Option<u32>,
    pub stacking_rule: Option<String>,
    pub status: PromotionStatus,
    pub creator_uuid: Option<UserUuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PromotionRecord {
    /// Whether `at` falls inside the `[start_at, end_at)` window.
    #[must_use]
    pub fn is_active_at(&self, at: Timestamp) -> bool {
        self.start_at <= at && at < self.end_at
    }
}

/// Promotion Store Exclusion Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRecord {
    pub promotion_uuid: PromotionUuid,
    pub store_uuid: StoreUuid,
    pub reason: Option<String>,
}

/// A single promotion with the stores of its brand and its exclusions.
#[derive(Debug, Clone)]
pub struct PromotionDetail {
    pub promotion: PromotionRecord,
    pub stores: Vec<StoreRecord>,
    pub exclusions: Vec<ExclusionRecord>,
}

/// Everything a client needs to browse the catalog offline.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub promotions: Vec<PromotionRecord>,
    pub stores: Vec<StoreRecord>,
    pub exclusions: Vec<ExclusionRecord>,
    pub brands: Vec<BrandRecord>,
}
