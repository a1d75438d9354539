//! Brands

pub mod data;
pub mod records;
mod repositories;

pub(crate) use repositories::{PgBrandAdminsRepository, PgBrandsRepository};
