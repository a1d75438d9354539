//! Promotions Data

use jiff::Timestamp;
use smallvec::SmallVec;

use crate::domain::promotions::records::{EventTag, PromoType, PromotionUuid};

/// New Promotion Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewPromotion {
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
    pub per_user_limit: u32,
    pub global_quota: Option<u32>,
    pub daily_quota: Option<u32>,
    pub stacking_rule: Option<String>,
}

/// Promotion Update Data
///
/// Outer `None` leaves a field unchanged. For the nullable fields,
/// `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromotionUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub promo_type: Option<PromoType>,
    pub event_tag: Option<EventTag>,
    pub start_at: Option<Timestamp>,
    pub end_at: Option<Timestamp>,
    pub need_membership: Option<bool>,
    pub need_code: Option<bool>,
    pub per_user_limit: Option<u32>,
    pub global_quota: Option<Option<u32>>,
    pub daily_quota: Option<Option<u32>>,
    pub stacking_rule: Option<Option<String>>,
}

/// Criteria for narrowing the promotion catalog. Empty lists match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromotionFilter {
    pub search: Option<String>,
    pub brand_keys: SmallVec<[String; 4]>,
    pub event_tags: SmallVec<[EventTag; 4]>,
    pub promo_types: SmallVec<[PromoType; 4]>,
    pub only_active: bool,
    pub need_membership: Option<bool>,
}

impl PromotionFilter {
    /// The trimmed search term, if one was given.
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

/// Escape `LIKE` metacharacters so a search term matches literally.
#[must_use]
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());

    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }

        escaped.push(ch);
    }

    escaped
}
