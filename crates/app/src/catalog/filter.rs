//! Catalog Filter

use jiff::Timestamp;

use crate::domain::{
    brands::{data::normalize_brand_key, records::BrandRecord},
    promotions::{
        data::PromotionFilter,
        records::{PromotionRecord, PromotionStatus},
    },
};

/// Whether `promotion` satisfies every criterion of `filter` at `at`.
///
/// Canceled promotions never match. List criteria are any-of and are skipped
/// when empty; brand keys compare case-insensitively. The search term is a
/// case-insensitive substring match against the title, the description and
/// the brand's display name.
#[must_use]
pub fn matches_filter(
    promotion: &PromotionRecord,
    brand: Option<&BrandRecord>,
    filter: &PromotionFilter,
    at: Timestamp,
) -> bool {
    if promotion.status == PromotionStatus::Canceled {
        return false;
    }

    if !filter.brand_keys.is_empty()
        && !filter
            .brand_keys
            .iter()
            .any(|key| normalize_brand_key(key) == promotion.brand_key)
    {
        return false;
    }

    if !filter.event_tags.is_empty() && !filter.event_tags.contains(&promotion.event_tag) {
        return false;
    }

    if !filter.promo_types.is_empty() && !filter.promo_types.contains(&promotion.promo_type) {
        return false;
    }

    if let Some(need_membership) = filter.need_membership
        && promotion.need_membership != need_membership
    {
        return false;
    }

    if filter.only_active && !promotion.is_active_at(at) {
        return false;
    }

    match filter.search_term() {
        Some(term) => matches_search(promotion, brand, &term.to_lowercase()),
        None => true,
    }
}

fn matches_search(promotion: &PromotionRecord, brand: Option<&BrandRecord>, term: &str) -> bool {
    promotion.title.to_lowercase().contains(term)
        || promotion.description.to_lowercase().contains(term)
        || brand.is_some_and(|brand| brand.display_name.to_lowercase().contains(term))
}

#[cfg(test)]
mod tests {
    use jiff::{Span, Timestamp};
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::domain::promotions::records::{EventTag, PromoType, PromotionUuid};

    use super::*;

    fn promotion(at: Timestamp) -> Result<PromotionRecord, jiff::Error> {
        Ok(PromotionRecord {
            uuid: PromotionUuid::new(),
            brand_key: "cafe".to_string(),
            title: "Second Cup Half Price".to_string(),
            description: "Bring a friend".to_string(),
            promo_type: PromoType::SecondCup,
            event_tag: EventTag::Seasonal,
            start_at: at.checked_sub(Span::new().hours(1))?,
            end_at: at.checked_add(Span::new().hours(1))?,
            need_membership: false,
            need_code: false,
            per_user_limit: 0,
            global_quota: None,
            daily_quota: None,
            stacking_rule: None,
            status: PromotionStatus::Published,
            creator_uuid: None,
            created_at: at,
            updated_at: at,
        })
    }

    fn brand(at: Timestamp) -> BrandRecord {
        BrandRecord {
            key: "cafe".to_string(),
            display_name: "Corner Cafe".to_string(),
            logo_url: None,
            primary_color: None,
            secondary_color: None,
            text_color: None,
            categories: Vec::new(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn empty_filter_matches_live_promotions() -> TestResult {
        let now = Timestamp::now();

        assert!(matches_filter(
            &promotion(now)?,
            None,
            &PromotionFilter::default(),
            now
        ));

        Ok(())
    }

    #[test]
    fn canceled_promotions_never_match() -> TestResult {
        let now = Timestamp::now();
        let mut promotion = promotion(now)?;

        promotion.status = PromotionStatus::Canceled;

        assert!(!matches_filter(
            &promotion,
            None,
            &PromotionFilter::default(),
            now
        ));

        Ok(())
    }

    #[test]
    fn brand_keys_compare_case_insensitively() -> TestResult {
        let now = Timestamp::now();

        let filter = PromotionFilter {
            brand_keys: smallvec!["CAFE".to_string()],
            ..PromotionFilter::default()
        };

        assert!(matches_filter(&promotion(now)?, None, &filter, now));

        let filter = PromotionFilter {
            brand_keys: smallvec!["bakery".to_string()],
            ..PromotionFilter::default()
        };

        assert!(!matches_filter(&promotion(now)?, None, &filter, now));

        Ok(())
    }

    #[test]
    fn non_ascii_brand_keys_match_their_stored_form() -> TestResult {
        let now = Timestamp::now();
        let mut promotion = promotion(now)?;

        promotion.brand_key = normalize_brand_key("ÉCLAIR Café");

        let filter = PromotionFilter {
            brand_keys: smallvec![" Éclair CAFÉ ".to_string()],
            ..PromotionFilter::default()
        };

        assert!(matches_filter(&promotion, None, &filter, now));

        Ok(())
    }

    #[test]
    fn search_covers_brand_display_name() -> TestResult {
        let now = Timestamp::now();
        let brand = brand(now);

        let filter = PromotionFilter {
            search: Some("corner".to_string()),
            ..PromotionFilter::default()
        };

        assert!(matches_filter(&promotion(now)?, Some(&brand), &filter, now));
        assert!(!matches_filter(&promotion(now)?, None, &filter, now));

        Ok(())
    }

    #[test]
    fn only_active_excludes_expired_promotions() -> TestResult {
        let now = Timestamp::now();
        let later = now.checked_add(Span::new().hours(2))?;

        let filter = PromotionFilter {
            only_active: true,
            ..PromotionFilter::default()
        };

        assert!(matches_filter(&promotion(now)?, None, &filter, now));
        assert!(!matches_filter(&promotion(now)?, None, &filter, later));

        Ok(())
    }

    #[test]
    fn list_criteria_are_conjunctive() -> TestResult {
        let now = Timestamp::now();

        let filter = PromotionFilter {
            event_tags: smallvec![EventTag::Seasonal],
            promo_types: smallvec![PromoType::Discount],
            ..PromotionFilter::default()
        };

        assert!(!matches_filter(&promotion(now)?, None, &filter, now));

        let filter = PromotionFilter {
            event_tags: smallvec![EventTag::Seasonal, EventTag::Holiday],
            promo_types: smallvec![PromoType::Discount, PromoType::SecondCup],
            need_membership: Some(false),
            ..PromotionFilter::default()
        };

        assert!(matches_filter(&promotion(now)?, None, &filter, now));

        Ok(())
    }
}
