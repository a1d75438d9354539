//! Brand Repositories

mod admins;
mod brands;

pub(crate) use admins::PgBrandAdminsRepository;
pub(crate) use brands::PgBrandsRepository;
