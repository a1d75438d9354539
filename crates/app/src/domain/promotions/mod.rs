//! Promotions

pub mod data;
mod errors;
pub mod records;
mod repositories;
pub mod service;

pub use errors::PromotionsServiceError;
pub(crate) use repositories::{PgExclusionsRepository, PgPromotionsRepository};
pub use service::{PgPromotionsService, PromotionsService};
