//! Users Data

use crate::domain::users::records::UserUuid;

/// New User Data
#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub uuid: UserUuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Lowercase and trim an email address for storage and lookups.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
