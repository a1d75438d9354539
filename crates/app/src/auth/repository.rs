//! Sessions repository.

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    auth::{
        SessionTokenVersion,
        models::{NewSession, SessionRecord, SessionUuid},
    },
    domain::users::records::UserUuid,
};

const CREATE_SESSION_SQL: &str = include_str!("sql/create_session.sql");
const FIND_ACTIVE_SESSION_SQL: &str = include_str!("sql/find_active_session.sql");
const TOUCH_SESSION_SQL: &str = include_str!("sql/touch_session.sql");
const REVOKE_SESSION_SQL: &str = include_str!("sql/revoke_session.sql");
const REVOKE_USER_SESSIONS_SQL: &str = include_str!("sql/revoke_user_sessions.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSessionsRepository;

impl PgSessionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: NewSession,
    ) -> Result<SessionRecord, sqlx::Error> {
        query_as::<Postgres, SessionRecord>(CREATE_SESSION_SQL)
            .bind(session.uuid)
            .bind(session.user_uuid)
            .bind(session.version.as_i16())
            .bind(session.token_hash)
            .bind(SqlxTimestamp::from(session.created_at))
            .bind(SqlxTimestamp::from(session.expires_at))
            .fetch_one(&mut **tx)
            .await
    }

    /// A session that is neither revoked nor expired at `at`.
    pub(crate) async fn find_active_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
        version: SessionTokenVersion,
        at: Timestamp,
    ) -> Result<Option<SessionRecord>, sqlx::Error> {
        query_as::<Postgres, SessionRecord>(FIND_ACTIVE_SESSION_SQL)
            .bind(session)
            .bind(version.as_i16())
            .bind(SqlxTimestamp::from(at))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn touch_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
        at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        query(TOUCH_SESSION_SQL)
            .bind(session)
            .bind(SqlxTimestamp::from(at))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Returns the number of sessions that were still active.
    pub(crate) async fn revoke_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REVOKE_SESSION_SQL)
            .bind(session)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn revoke_user_sessions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REVOKE_USER_SESSIONS_SQL)
            .bind(user)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for SessionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let version = SessionTokenVersion::try_from(row.try_get::<i16, _>("version")?)
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "version".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: row.try_get("user_uuid")?,
            version,
            token_hash: row.try_get("token_hash")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            last_used_at: row
                .try_get::<Option<SqlxTimestamp>, _>("last_used_at")?
                .map(SqlxTimestamp::to_jiff),
            expires_at: row.try_get::<SqlxTimestamp, _>("expires_at")?.to_jiff(),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
