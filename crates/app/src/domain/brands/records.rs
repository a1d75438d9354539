//! Brand Records

use jiff::Timestamp;

/// Colour used when a brand has no primary colour of its own.
pub const DEFAULT_PRIMARY_COLOR: &str = "#4B5563";

/// Colour used when a brand has no text colour of its own.
pub const DEFAULT_TEXT_COLOR: &str = "#111827";

/// Brand Record
///
/// Brands are keyed by their normalised (trimmed, lowercase) name.
#[derive(Debug, Clone, PartialEq)]
pub struct BrandRecord {
    pub key: String,
    pub display_name: String,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub text_color: Option<String>,
    pub categories: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl BrandRecord {
    #[must_use]
    pub fn primary_color_or_default(&self) -> &str {
        self.primary_color.as_deref().unwrap_or(DEFAULT_PRIMARY_COLOR)
    }

    #[must_use]
    pub fn text_color_or_default(&self) -> &str {
        self.text_color.as_deref().unwrap_or(DEFAULT_TEXT_COLOR)
    }
}
