//! Promotion catalogue, claim quotas, and brand administration services.

pub mod auth;
pub mod catalog;
pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;

mod uuids;
