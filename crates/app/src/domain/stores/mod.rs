//! Stores

pub mod data;
pub mod records;
mod repository;

pub(crate) use repository::PgStoresRepository;
