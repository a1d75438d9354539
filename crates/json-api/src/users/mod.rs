//! Signed-in user resources: profile, favorites, usage and rankings.

mod errors;
mod handlers;

pub(crate) use handlers::*;
