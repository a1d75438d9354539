//! Promoradar Domain Concerns

pub mod admin;
pub mod brands;
pub mod favorites;
pub mod promotions;
pub mod redemptions;
pub mod stores;
pub mod tracking;
pub mod users;
