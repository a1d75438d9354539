//! Catalog Sorting

use std::{fmt, str::FromStr};

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::domain::{brands::records::BrandRecord, promotions::records::PromotionRecord};

/// Order in which browsed promotions are listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CatalogSort {
    /// Earliest end first.
    #[default]
    SoonestEnd,

    /// Latest start first.
    Newest,

    /// Brand display name, A to Z.
    Brand,
}

impl CatalogSort {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SoonestEnd => "soonest_end",
            Self::Newest => "newest",
            Self::Brand => "brand",
        }
    }
}

impl fmt::Display for CatalogSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort order: {0}")]
pub struct UnknownCatalogSort(pub String);

impl FromStr for CatalogSort {
    type Err = UnknownCatalogSort;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "soonest_end" => Ok(Self::SoonestEnd),
            "newest" => Ok(Self::Newest),
            "brand" => Ok(Self::Brand),
            other => Err(UnknownCatalogSort(other.to_string())),
        }
    }
}

/// Sort `promotions` in place.
///
/// Promotions of followed brands come first; within each group the chosen
/// order applies and ties fall back to the title. The sort is stable.
pub fn sort_promotions(
    promotions: &mut [&PromotionRecord],
    sort: CatalogSort,
    brands: &FxHashMap<String, BrandRecord>,
    followed: &FxHashSet<String>,
) {
    let display_name = |promotion: &PromotionRecord| {
        brands
            .get(&promotion.brand_key)
            .map_or(promotion.brand_key.as_str(), |brand| {
                brand.display_name.as_str()
            })
            .to_lowercase()
    };

    promotions.sort_by(|a, b| {
        let a_followed = followed.contains(&a.brand_key);
        let b_followed = followed.contains(&b.brand_key);

        b_followed
            .cmp(&a_followed)
            .then_with(|| match sort {
                CatalogSort::SoonestEnd => a.end_at.cmp(&b.end_at),
                CatalogSort::Newest => b.start_at.cmp(&a.start_at),
                CatalogSort::Brand => display_name(a).cmp(&display_name(b)),
            })
            .then_with(|| a.title.cmp(&b.title))
    });
}
