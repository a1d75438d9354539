//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, AuthServiceError, PgAuthService, models::AuthSettings},
    database::{self, Db},
    domain::{
        admin::{AdminService, PgAdminService},
        promotions::{PgPromotionsService, PromotionsService},
        redemptions::{PgRedemptionsService, RedemptionsService},
        tracking::{PgTrackingService, TrackingService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),

    #[error("invalid auth settings")]
    Auth(#[source] AuthServiceError),
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub promotions: Arc<dyn PromotionsService>,
    pub redemptions: Arc<dyn RedemptionsService>,
    pub admin: Arc<dyn AdminService>,
    pub users: Arc<dyn UsersService>,
    pub tracking: Arc<dyn TrackingService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// Pending migrations are applied first when `run_migrations` is set.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting, migrating or validating the auth
    /// settings fails.
    pub async fn from_database_url(
        url: &str,
        max_connections: u32,
        run_migrations: bool,
        auth: AuthSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        if run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrations)?;
        }

        Self::from_db(Db::new(pool), auth)
    }

    /// Wire every service onto an existing pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the session secret is rejected.
    pub fn from_db(db: Db, auth: AuthSettings) -> Result<Self, AppInitError> {
        let tracking: Arc<dyn TrackingService> = Arc::new(PgTrackingService::new(db.clone()));

        Ok(Self {
            auth: Arc::new(PgAuthService::new(db.clone(), auth).map_err(AppInitError::Auth)?),
            promotions: Arc::new(PgPromotionsService::new(db.clone())),
            redemptions: Arc::new(PgRedemptionsService::new(db.clone())),
            admin: Arc::new(PgAdminService::new(db.clone(), Arc::clone(&tracking))),
            users: Arc::new(PgUsersService::new(db)),
            tracking,
        })
    }
}
