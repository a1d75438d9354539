//! Authentication

mod errors;
pub mod models;
pub mod passwords;
mod repository;
mod service;
mod signer;
mod token;

pub use errors::*;
pub use service::*;
pub use signer::*;
pub use token::*;
