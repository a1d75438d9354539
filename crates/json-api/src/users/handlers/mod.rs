//! User Handlers

pub(crate) mod admin_brands;
pub(crate) mod brand_favorites;
pub(crate) mod profile;
pub(crate) mod promotion_favorites;
pub(crate) mod rankings;
pub(crate) mod usage;
