//! Brand Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use promoradar_app::domain::brands::records::BrandRecord;

/// Brand Response
///
/// Missing primary and text colours are filled with the catalog defaults.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BrandResponse {
    pub key: String,
    pub display_name: String,
    pub logo_url: Option<String>,
    pub primary_color: String,
    pub secondary_color: Option<String>,
    pub text_color: String,
    pub categories: Vec<String>,
}

impl From<BrandRecord> for BrandResponse {
    fn from(brand: BrandRecord) -> Self {
        Self {
            primary_color: brand.primary_color_or_default().to_owned(),
            text_color: brand.text_color_or_default().to_owned(),
            key: brand.key,
            display_name: brand.display_name,
            logo_url: brand.logo_url,
            secondary_color: brand.secondary_color,
            categories: brand.categories,
        }
    }
}

/// Brand List Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BrandListResponse {
    pub items: Vec<BrandResponse>,
}

impl From<Vec<BrandRecord>> for BrandListResponse {
    fn from(brands: Vec<BrandRecord>) -> Self {
        Self {
            items: brands.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helpers::make_brand;

    use super::*;

    #[test]
    fn default_colours_are_filled_in() {
        let response = BrandResponse::from(make_brand("cafe"));

        assert_eq!(response.primary_color, "#4B5563");
        assert_eq!(response.text_color, "#111827");
        assert_eq!(response.secondary_color, None);
    }
}
