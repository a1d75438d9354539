//! Catalog query string parsing.

use std::str::FromStr;

use salvo::prelude::StatusError;
use serde::Deserialize;
use smallvec::SmallVec;

use promoradar_app::{
    catalog::CatalogSort,
    domain::{brands::data::normalize_brand_key, promotions::data::PromotionFilter},
};

use crate::extensions::*;

/// Catalog query parameters. List values are comma separated.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromotionQuery {
    pub search: Option<String>,
    pub brand_names: Option<String>,
    pub event_tags: Option<String>,
    pub promo_types: Option<String>,
    pub only_active: Option<bool>,
    pub need_membership: Option<bool>,
    pub sort: Option<String>,
    pub followed: Option<String>,
}

impl PromotionQuery {
    /// Build the service filter, rejecting unknown tags and types.
    pub(crate) fn filter(&self) -> Result<PromotionFilter, StatusError> {
        Ok(PromotionFilter {
            search: self.search.clone(),
            brand_keys: split_list(self.brand_names.as_deref())
                .map(normalize_brand_key)
                .collect(),
            event_tags: parse_list(self.event_tags.as_deref())?,
            promo_types: parse_list(self.promo_types.as_deref())?,
            only_active: self.only_active.unwrap_or(false),
            need_membership: self.need_membership,
        })
    }

    pub(crate) fn sort(&self) -> Result<CatalogSort, StatusError> {
        self.sort
            .as_deref()
            .map(str::trim)
            .filter(|sort| !sort.is_empty())
            .map(CatalogSort::from_str)
            .transpose()
            .or_400("unknown sort order")
            .map(Option::unwrap_or_default)
    }

    /// Followed brand keys, normalised.
    pub(crate) fn followed(&self) -> Vec<String> {
        split_list(self.followed.as_deref())
            .map(normalize_brand_key)
            .collect()
    }
}

fn split_list(value: Option<&str>) -> impl Iterator<Item = &str> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

/// Parse a comma separated list of wire names.
fn parse_list<T>(value: Option<&str>) -> Result<SmallVec<[T; 4]>, StatusError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    split_list(value)
        .map(|item| {
            item.parse::<T>()
                .map_err(|error| StatusError::bad_request().brief(error.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use promoradar_app::domain::promotions::records::{EventTag, PromoType};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn lists_are_split_and_normalised() -> TestResult {
        let query = PromotionQuery {
            brand_names: Some(" Cafe ,TEA,, ".to_string()),
            event_tags: Some("Holiday,Membership".to_string()),
            promo_types: Some("Second_Cup".to_string()),
            only_active: Some(true),
            ..PromotionQuery::default()
        };

        let filter = query.filter()?;

        assert_eq!(filter.brand_keys.as_slice(), ["cafe", "tea"]);
        assert_eq!(
            filter.event_tags.as_slice(),
            [EventTag::Holiday, EventTag::Membership]
        );
        assert_eq!(filter.promo_types.as_slice(), [PromoType::SecondCup]);
        assert!(filter.only_active);
        assert_eq!(filter.need_membership, None);

        Ok(())
    }

    #[test]
    fn unknown_event_tag_is_rejected() {
        let query = PromotionQuery {
            event_tags: Some("Weekly".to_string()),
            ..PromotionQuery::default()
        };

        let error = query.filter().err();

        assert_eq!(
            error.map(|status| status.brief),
            Some("unknown event tag: Weekly".to_string())
        );
    }

    #[test]
    fn sort_defaults_to_soonest_end() -> TestResult {
        assert_eq!(PromotionQuery::default().sort()?, CatalogSort::SoonestEnd);

        let newest = PromotionQuery {
            sort: Some("newest".to_string()),
            ..PromotionQuery::default()
        };

        assert_eq!(newest.sort()?, CatalogSort::Newest);

        let bogus = PromotionQuery {
            sort: Some("cheapest".to_string()),
            ..PromotionQuery::default()
        };

        assert!(bogus.sort().is_err());

        Ok(())
    }
}
