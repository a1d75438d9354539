//! Catalog
//!
//! An in-memory view over the public promotion [`Dataset`](crate::domain::promotions::records::Dataset),
//! used to browse promotions without going back to the database for every
//! filter or sort change.

mod filter;
mod index;
mod sort;

pub use filter::matches_filter;
pub use index::CatalogIndex;
pub use sort::{CatalogSort, UnknownCatalogSort, sort_promotions};
