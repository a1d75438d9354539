//! Operator Service
//!
//! Maintenance operations run from the command line rather than the API.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        admin::AdminServiceError,
        brands::{PgBrandAdminsRepository, PgBrandsRepository, data::normalize_brand_key},
        users::{PgUsersRepository, data::normalize_email, records::UserRecord},
    },
};

#[derive(Debug, Clone)]
pub struct PgOperatorService {
    db: Db,
    users: PgUsersRepository,
    brands: PgBrandsRepository,
    brand_admins: PgBrandAdminsRepository,
}

impl PgOperatorService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            users: PgUsersRepository::new(),
            brands: PgBrandsRepository::new(),
            brand_admins: PgBrandAdminsRepository::new(),
        }
    }
}

#[async_trait]
impl OperatorService for PgOperatorService {
    #[tracing::instrument(
        name = "operator.service.grant_brand_admin",
        skip(self, email),
        fields(brand_key = %brand_key),
        err
    )]
    async fn grant_brand_admin(
        &self,
        email: String,
        brand_key: String,
    ) -> Result<UserRecord, AdminServiceError> {
        let key = normalize_brand_key(&brand_key);

        let mut tx = self.db.begin_transaction().await?;

        let credentials = self
            .users
            .find_user_by_email(&mut tx, &normalize_email(&email))
            .await?
            .ok_or(AdminServiceError::NotFound)?;

        let user = credentials.user;

        self.brands.get_brand(&mut tx, &key).await?;
        self.brand_admins
            .add_brand_admin(&mut tx, user.uuid, &key)
            .await?;
        self.users.set_admin_flag(&mut tx, user.uuid, true).await?;

        let user = self.users.get_user(&mut tx, user.uuid).await?;

        tx.commit().await?;

        info!(user_uuid = %user.uuid, brand_key = %key, "granted brand admin");

        Ok(user)
    }

    #[tracing::instrument(
        name = "operator.service.revoke_brand_admin",
        skip(self, email),
        fields(brand_key = %brand_key),
        err
    )]
    async fn revoke_brand_admin(
        &self,
        email: String,
        brand_key: String,
    ) -> Result<bool, AdminServiceError> {
        let key = normalize_brand_key(&brand_key);

        let mut tx = self.db.begin_transaction().await?;

        let credentials = self
            .users
            .find_user_by_email(&mut tx, &normalize_email(&email))
            .await?
            .ok_or(AdminServiceError::NotFound)?;

        let user = credentials.user.uuid;

        let removed = self.brand_admins.remove_brand_admin(&mut tx, user, &key).await? > 0;

        // The admin flag follows membership: drop it with the last brand.
        if self.brand_admins.count_admin_brands(&mut tx, user).await? == 0 {
            self.users.set_admin_flag(&mut tx, user, false).await?;
        }

        tx.commit().await?;

        info!(user_uuid = %user, brand_key = %key, removed, "revoked brand admin");

        Ok(removed)
    }
}

#[automock]
#[async_trait]
pub trait OperatorService: Send + Sync {
    /// Make the user with `email` an administrator of `brand_key`.
    async fn grant_brand_admin(
        &self,
        email: String,
        brand_key: String,
    ) -> Result<UserRecord, AdminServiceError>;

    /// Remove the user's administrator rights on `brand_key`.
    ///
    /// Returns whether a membership was removed.
    async fn revoke_brand_admin(
        &self,
        email: String,
        brand_key: String,
    ) -> Result<bool, AdminServiceError>;
}
