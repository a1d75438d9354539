//! Behaviour tracking endpoint.

#[path = "handler.rs"]
mod track;

pub(crate) use track::handler;
