//! Test context for service-level integration tests.

use std::sync::Arc;

use crate::{
    auth::{PgAuthService, models::AuthSettings},
    database::Db,
    domain::{
        admin::{PgAdminService, PgOperatorService},
        promotions::PgPromotionsService,
        redemptions::PgRedemptionsService,
        tracking::{PgTrackingService, TrackingService},
        users::PgUsersService,
    },
};

use super::db::TestDb;

pub(crate) const TEST_SESSION_SECRET: &str = "promoradar-test-session-secret";

pub(crate) struct TestContext {
    pub db: TestDb,
    pub auth: PgAuthService,
    pub promotions: PgPromotionsService,
    pub redemptions: PgRedemptionsService,
    pub admin: PgAdminService,
    pub operator: PgOperatorService,
    pub users: PgUsersService,
    pub tracking: PgTrackingService,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_session_ttl(crate::auth::models::DEFAULT_SESSION_TTL).await
    }

    pub async fn with_session_ttl(session_ttl: jiff::SignedDuration) -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        let tracking = PgTrackingService::new(db.clone());
        let shared_tracking: Arc<dyn TrackingService> = Arc::new(tracking.clone());

        let auth = PgAuthService::new(
            db.clone(),
            AuthSettings {
                session_secret: TEST_SESSION_SECRET.to_string(),
                session_ttl,
            },
        )
        .expect("Failed to build auth service");

        Self {
            auth,
            promotions: PgPromotionsService::new(db.clone()),
            redemptions: PgRedemptionsService::new(db.clone()),
            admin: PgAdminService::new(db.clone(), shared_tracking),
            operator: PgOperatorService::new(db.clone()),
            users: PgUsersService::new(db),
            tracking,
            db: test_db,
        }
    }
}
