//! Admin Handlers

pub(crate) mod brands;
pub(crate) mod exclusions;
pub(crate) mod lifecycle;
pub(crate) mod promotions;
pub(crate) mod quota;
pub(crate) mod stores;
