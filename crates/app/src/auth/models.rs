//! Auth data models.

use jiff::{SignedDuration, Timestamp};

use crate::{
    auth::SessionTokenVersion,
    domain::users::records::{UserRecord, UserUuid},
    uuids::TypedUuid,
};

/// Session UUID
pub type SessionUuid = TypedUuid<SessionRecord>;

/// Default session lifetime.
pub const DEFAULT_SESSION_TTL: SignedDuration = SignedDuration::from_mins(120);

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Minimum username length accepted at signup.
pub const MIN_USERNAME_LEN: usize = 2;

/// Session metadata persisted in storage.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub uuid: SessionUuid,
    pub user_uuid: UserUuid,
    pub version: SessionTokenVersion,

    /// HMAC verifier of the token secret material.
    pub token_hash: String,

    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
}

/// New session persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewSession {
    pub uuid: SessionUuid,
    pub user_uuid: UserUuid,
    pub version: SessionTokenVersion,
    pub token_hash: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

/// The caller behind a verified bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_uuid: UserUuid,
    pub session_uuid: SessionUuid,
}

/// Session issuance result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub user: UserRecord,
    pub expires_at: Timestamp,
}

/// Signup request.
#[derive(Debug, Clone)]
pub struct Signup {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login request.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Settings for issuing and verifying sessions.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub session_secret: String,
    pub session_ttl: SignedDuration,
}
