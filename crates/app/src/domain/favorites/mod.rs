//! Favorites

mod repository;

pub(crate) use repository::PgFavoritesRepository;
