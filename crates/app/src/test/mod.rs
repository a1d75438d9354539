//! Shared fixtures for service-level integration tests.

mod context;
mod db;
pub(crate) mod helpers;

pub(crate) use context::TestContext;
