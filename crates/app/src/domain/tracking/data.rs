//! Behaviour Event Data

use jiff::Timestamp;

use crate::domain::{
    promotions::records::PromotionUuid,
    stores::records::StoreUuid,
    tracking::records::{AdminAction, BehaviorEventUuid, BehaviorKind, UserAction},
    users::records::UserUuid,
};

/// Whoever triggered an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    User(UserUuid),

    /// An anonymous visitor, identified by the client address.
    Guest(String),
}

impl Actor {
    /// The stored actor id. Guests get `guest_<ip>_<millis>`.
    #[must_use]
    pub fn to_actor_id(&self, at: Timestamp) -> String {
        match self {
            Self::User(user) => user.to_string(),
            Self::Guest(ip) => format!("guest_{ip}_{}", at.as_millisecond()),
        }
    }
}

/// An event waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedEvent {
    pub actor: Actor,
    pub kind: BehaviorKind,
    pub action: &'static str,
    pub promotion_uuid: Option<PromotionUuid>,
    pub brand_key: Option<String>,
    pub store_uuid: Option<StoreUuid>,
    pub search_keyword: Option<String>,
    pub tags: Vec<String>,
}

impl TrackedEvent {
    #[must_use]
    pub fn user(actor: Actor, action: UserAction) -> Self {
        Self::new(actor, BehaviorKind::User, action.as_str())
    }

    #[must_use]
    pub fn admin(user: UserUuid, action: AdminAction) -> Self {
        Self::new(Actor::User(user), BehaviorKind::Admin, action.as_str())
    }

    fn new(actor: Actor, kind: BehaviorKind, action: &'static str) -> Self {
        Self {
            actor,
            kind,
            action,
            promotion_uuid: None,
            brand_key: None,
            store_uuid: None,
            search_keyword: None,
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_promotion(mut self, promotion: PromotionUuid) -> Self {
        self.promotion_uuid = Some(promotion);
        self
    }

    #[must_use]
    pub fn with_brand(mut self, brand_key: impl Into<String>) -> Self {
        self.brand_key = Some(brand_key.into());
        self
    }

    #[must_use]
    pub fn with_store(mut self, store: StoreUuid) -> Self {
        self.store_uuid = Some(store);
        self
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NewBehaviorEvent {
    pub uuid: BehaviorEventUuid,
    pub actor: String,
    pub kind: BehaviorKind,
    pub action: &'static str,
    pub promotion_uuid: Option<PromotionUuid>,
    pub brand_key: Option<String>,
    pub store_uuid: Option<StoreUuid>,
    pub search_keyword: Option<String>,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
}

impl NewBehaviorEvent {
    pub(crate) fn from_tracked(event: TrackedEvent, at: Timestamp) -> Self {
        Self {
            uuid: BehaviorEventUuid::new(),
            actor: event.actor.to_actor_id(at),
            kind: event.kind,
            action: event.action,
            promotion_uuid: event.promotion_uuid,
            brand_key: event.brand_key,
            store_uuid: event.store_uuid,
            search_keyword: event.search_keyword,
            tags: event.tags,
            created_at: at,
        }
    }
}
