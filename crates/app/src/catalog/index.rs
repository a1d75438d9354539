//! Catalog Index

use jiff::Timestamp;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::{
    catalog::{
        filter::matches_filter,
        sort::{CatalogSort, sort_promotions},
    },
    domain::{
        brands::records::BrandRecord,
        promotions::{
            data::PromotionFilter,
            records::{Dataset, ExclusionRecord, PromotionRecord, PromotionUuid},
        },
        stores::records::{StoreRecord, StoreUuid},
    },
};

/// Lookup tables built once from a [`Dataset`].
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    promotions: FxHashMap<PromotionUuid, PromotionRecord>,
    stores: FxHashMap<StoreUuid, StoreRecord>,
    stores_by_brand: FxHashMap<String, SmallVec<[StoreUuid; 8]>>,
    brands: FxHashMap<String, BrandRecord>,
    exclusions: FxHashMap<PromotionUuid, FxHashSet<StoreUuid>>,
}

impl CatalogIndex {
    /// Index every record in `dataset`.
    #[must_use]
    pub fn build(dataset: Dataset) -> Self {
        let Dataset {
            promotions,
            stores,
            exclusions,
            brands,
        } = dataset;

        let mut stores_by_brand: FxHashMap<String, SmallVec<[StoreUuid; 8]>> =
            FxHashMap::default();

        for store in &stores {
            stores_by_brand
                .entry(store.brand_key.clone())
                .or_default()
                .push(store.uuid);
        }

        let mut exclusions_by_promotion: FxHashMap<PromotionUuid, FxHashSet<StoreUuid>> =
            FxHashMap::default();

        for ExclusionRecord {
            promotion_uuid,
            store_uuid,
            ..
        } in exclusions
        {
            exclusions_by_promotion
                .entry(promotion_uuid)
                .or_default()
                .insert(store_uuid);
        }

        Self {
            promotions: promotions.into_iter().map(|p| (p.uuid, p)).collect(),
            stores: stores.into_iter().map(|s| (s.uuid, s)).collect(),
            stores_by_brand,
            brands: brands.into_iter().map(|b| (b.key.clone(), b)).collect(),
            exclusions: exclusions_by_promotion,
        }
    }

    #[must_use]
    pub fn promotion(&self, uuid: PromotionUuid) -> Option<&PromotionRecord> {
        self.promotions.get(&uuid)
    }

    #[must_use]
    pub fn store(&self, uuid: StoreUuid) -> Option<&StoreRecord> {
        self.stores.get(&uuid)
    }

    #[must_use]
    pub fn brand(&self, key: &str) -> Option<&BrandRecord> {
        self.brands.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.promotions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.promotions.is_empty()
    }

    /// Active stores of the promotion's brand that are not excluded from it,
    /// ordered by name.
    #[must_use]
    pub fn applicable_stores(&self, promotion: PromotionUuid) -> Vec<&StoreRecord> {
        let Some(record) = self.promotions.get(&promotion) else {
            return Vec::new();
        };

        let excluded = self.exclusions.get(&promotion);

        let mut stores: Vec<&StoreRecord> = self
            .stores_by_brand
            .get(&record.brand_key)
            .into_iter()
            .flatten()
            .filter(|uuid| excluded.is_none_or(|set| !set.contains(*uuid)))
            .filter_map(|uuid| self.stores.get(uuid))
            .filter(|store| store.is_active)
            .collect();

        stores.sort_by(|a, b| a.name.cmp(&b.name));

        stores
    }

    /// Filter and order the indexed promotions.
    ///
    /// `followed` holds normalised brand keys whose promotions are listed
    /// ahead of the rest.
    #[must_use]
    pub fn browse(
        &self,
        filter: &PromotionFilter,
        sort: CatalogSort,
        followed: &FxHashSet<String>,
        at: Timestamp,
    ) -> Vec<&PromotionRecord> {
        let mut matches: Vec<&PromotionRecord> = self
            .promotions
            .values()
            .filter(|promotion| {
                matches_filter(
                    promotion,
                    self.brands.get(&promotion.brand_key),
                    filter,
                    at,
                )
            })
            .collect();

        sort_promotions(&mut matches, sort, &self.brands, followed);

        matches
    }
}

#[cfg(test)]
mod tests {
    use jiff::Span;
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::domain::promotions::records::{EventTag, PromoType, PromotionStatus};

    use super::*;

    fn store(brand_key: &str, name: &str, is_active: bool) -> StoreRecord {
        StoreRecord {
            uuid: StoreUuid::new(),
            brand_key: brand_key.to_string(),
            name: name.to_string(),
            address: "1 Main St".to_string(),
            lat: None,
            lng: None,
            region: "North".to_string(),
            is_active,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn promotion(
        brand_key: &str,
        title: &str,
        end_hours: i64,
    ) -> Result<PromotionRecord, jiff::Error> {
        let now = Timestamp::now();

        Ok(PromotionRecord {
            uuid: PromotionUuid::new(),
            brand_key: brand_key.to_string(),
            title: title.to_string(),
            description: String::new(),
            promo_type: PromoType::Buy1Get1,
            event_tag: EventTag::LimitedTime,
            start_at: now.checked_sub(Span::new().hours(1))?,
            end_at: now.checked_add(Span::new().hours(end_hours))?,
            need_membership: false,
            need_code: false,
            per_user_limit: 0,
            global_quota: None,
            daily_quota: None,
            stacking_rule: None,
            status: PromotionStatus::Published,
            creator_uuid: None,
            created_at: now,
            updated_at: now,
        })
    }

    #[test]
    fn applicable_stores_skip_excluded_and_inactive() -> TestResult {
        let promo = promotion("cafe", "Latte Deal", 5)?;
        let downtown = store("cafe", "Downtown", true);
        let airport = store("cafe", "Airport", true);
        let closed = store("cafe", "Closed", false);
        let elsewhere = store("bakery", "Bakery", true);

        let dataset = Dataset {
            exclusions: vec![ExclusionRecord {
                promotion_uuid: promo.uuid,
                store_uuid: airport.uuid,
                reason: Some("renovation".to_string()),
            }],
            promotions: vec![promo.clone()],
            stores: vec![downtown.clone(), airport, closed, elsewhere],
            brands: Vec::new(),
        };

        let index = CatalogIndex::build(dataset);

        let names: Vec<&str> = index
            .applicable_stores(promo.uuid)
            .into_iter()
            .map(|s| s.name.as_str())
            .collect();

        assert_eq!(names, vec!["Downtown"]);
        assert_eq!(index.store(downtown.uuid).map(|s| s.uuid), Some(downtown.uuid));

        Ok(())
    }

    #[test]
    fn unknown_promotion_has_no_stores() {
        let index = CatalogIndex::build(Dataset::default());

        assert!(index.is_empty());
        assert!(index.applicable_stores(PromotionUuid::new()).is_empty());
    }

    #[test]
    fn browse_filters_then_sorts() -> TestResult {
        let ending = promotion("cafe", "Ending Soon", 1)?;
        let lasting = promotion("cafe", "Lasting", 10)?;
        let other = promotion("bakery", "Bread", 2)?;

        let index = CatalogIndex::build(Dataset {
            promotions: vec![lasting, other, ending],
            ..Dataset::default()
        });

        let filter = PromotionFilter {
            brand_keys: smallvec!["cafe".to_string()],
            ..PromotionFilter::default()
        };

        let titles: Vec<&str> = index
            .browse(
                &filter,
                CatalogSort::SoonestEnd,
                &FxHashSet::default(),
                Timestamp::now(),
            )
            .into_iter()
            .map(|p| p.title.as_str())
            .collect();

        assert_eq!(titles, vec!["Ending Soon", "Lasting"]);
        assert_eq!(index.len(), 3);

        Ok(())
    }
}
