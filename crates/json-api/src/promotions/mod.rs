//! Promotions

mod errors;
mod handlers;
mod query;

pub(crate) use handlers::*;
