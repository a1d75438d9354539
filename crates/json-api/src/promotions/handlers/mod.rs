//! Promotion Handlers

pub(crate) mod browse;
pub(crate) mod claim;
pub(crate) mod dataset;
pub(crate) mod get;
pub(crate) mod index;
