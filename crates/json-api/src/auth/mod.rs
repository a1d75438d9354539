//! Authentication

mod errors;
mod handlers;
pub(crate) mod middleware;

pub(crate) use errors::INVALID_TOKEN;
pub(crate) use handlers::*;
