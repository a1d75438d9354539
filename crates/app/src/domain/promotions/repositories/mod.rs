//! Promotion Repositories

mod exclusions;
mod promotions;

pub(crate) use exclusions::PgExclusionsRepository;
pub(crate) use promotions::PgPromotionsRepository;
