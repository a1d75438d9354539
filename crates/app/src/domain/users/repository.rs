//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::users::{
    data::NewUser,
    records::{UserCredentials, UserRecord, UserUuid},
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const FIND_USER_BY_EMAIL_SQL: &str = include_str!("sql/find_user_by_email.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const SET_ADMIN_FLAG_SQL: &str = include_str!("sql/set_admin_flag.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: NewUser,
    ) -> Result<UserCredentials, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(CREATE_USER_SQL)
            .bind(user.uuid)
            .bind(user.username)
            .bind(user.email)
            .bind(user.password_hash)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_user_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(FIND_USER_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_admin_flag(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        is_admin: bool,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_ADMIN_FLAG_SQL)
            .bind(user)
            .bind(is_admin)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            is_admin: row.try_get("is_admin")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for UserCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user: UserRecord::from_row(row)?,
            password_hash: row.try_get("password_hash")?,
        })
    }
}
