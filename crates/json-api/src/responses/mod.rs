//! Response bodies shared across resources.

mod brands;
mod promotions;
mod stores;
mod usage;
mod users;

pub(crate) use brands::*;
pub(crate) use promotions::*;
pub(crate) use stores::*;
pub(crate) use usage::*;
pub(crate) use users::*;
