//! Brand Administration

mod errors;
pub mod operator;
pub mod service;
mod validation;

pub use errors::AdminServiceError;
pub use operator::{OperatorService, PgOperatorService};
pub use service::{AdminService, PgAdminService};
