//! Auth Handlers

pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod signup;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use promoradar_app::auth::models::IssuedSession;

use crate::responses::UserResponse;

/// Session Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,
    pub expires_at: String,
    pub user: UserResponse,
}

impl From<IssuedSession> for SessionResponse {
    fn from(session: IssuedSession) -> Self {
        Self {
            token: session.token,
            expires_at: session.expires_at.to_string(),
            user: session.user.into(),
        }
    }
}
