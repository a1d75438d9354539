//! Brand administration: brands, stores, promotions and their quotas.

mod errors;
mod handlers;
mod requests;

pub(crate) use handlers::*;
