//! Input checks applied before admin writes reach the database.

use jiff::Timestamp;

use crate::domain::{
    admin::AdminServiceError,
    brands::data::NewBrand,
    promotions::data::{NewPromotion, PromotionUpdate},
    stores::data::NewStore,
};

/// Largest limit or quota the `INTEGER` columns can hold.
const MAX_LIMIT: u32 = i32::MAX.unsigned_abs();

fn invalid(message: &str) -> AdminServiceError {
    AdminServiceError::Validation(message.to_string())
}

pub(crate) fn validate_new_brand(brand: &NewBrand) -> Result<(), AdminServiceError> {
    if brand.key.is_empty() {
        return Err(invalid("brandName is required"));
    }

    if brand.display_name.is_empty() {
        return Err(invalid("displayName is required"));
    }

    Ok(())
}

pub(crate) fn validate_new_store(store: &NewStore) -> Result<(), AdminServiceError> {
    if store.brand_key.is_empty() {
        return Err(invalid("brandName is required"));
    }

    if store.name.trim().is_empty() {
        return Err(invalid("name is required"));
    }

    Ok(())
}

pub(crate) fn validate_new_promotion(promotion: &NewPromotion) -> Result<(), AdminServiceError> {
    if promotion.brand_key.is_empty() {
        return Err(invalid("brandName is required"));
    }

    if promotion.title.is_empty() {
        return Err(invalid("title is required"));
    }

    validate_limit(Some(promotion.per_user_limit), "perUserLimit")?;
    validate_limit(promotion.global_quota, "globalQuota")?;
    validate_limit(promotion.daily_quota, "dailyQuota")?;

    validate_window(promotion.start_at, promotion.end_at)
}

/// Limits and quotas supplied by an update, checked the same way as on create.
pub(crate) fn validate_update_limits(update: &PromotionUpdate) -> Result<(), AdminServiceError> {
    validate_limit(update.per_user_limit, "perUserLimit")?;
    validate_limit(update.global_quota.flatten(), "globalQuota")?;
    validate_limit(update.daily_quota.flatten(), "dailyQuota")
}

fn validate_limit(value: Option<u32>, field: &str) -> Result<(), AdminServiceError> {
    match value {
        Some(value) if value > MAX_LIMIT => Err(AdminServiceError::Validation(format!(
            "{field} must not exceed {MAX_LIMIT}"
        ))),
        _ => Ok(()),
    }
}

/// A promotion window must end strictly after it starts.
pub(crate) fn validate_window(
    start_at: Timestamp,
    end_at: Timestamp,
) -> Result<(), AdminServiceError> {
    if end_at <= start_at {
        return Err(invalid("endDatetime must be after startDatetime"));
    }

    Ok(())
}
