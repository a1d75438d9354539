//! Brands Data

/// New Brand Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewBrand {
    pub key: String,
    pub display_name: String,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub text_color: Option<String>,
    pub categories: Vec<String>,
}

/// Brand Update Data
///
/// `None` leaves a field untouched. `categories` replaces the whole set when present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrandUpdate {
    pub display_name: Option<String>,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub text_color: Option<String>,
    pub categories: Option<Vec<String>>,
}

/// Normalise a brand name into its lookup key.
#[must_use]
pub fn normalize_brand_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Trim, drop empties and de-duplicate category names, keeping first-seen order.
#[must_use]
pub fn normalize_categories(categories: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(categories.len());

    for category in categories {
        let category = category.trim();

        if !category.is_empty() && !normalized.iter().any(|seen| seen == category) {
            normalized.push(category.to_string());
        }
    }

    normalized
}
