//! Logout Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{auth::errors::into_status_error, extensions::*, state::State};

/// Logout Handler
///
/// Revokes the session that made the request.
#[endpoint(
    tags("auth"),
    summary = "Log Out",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Session revoked"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
#[tracing::instrument(name = "auth.logout", skip(depot), fields(session_uuid = tracing::field::Empty), err)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    tracing::Span::current().record("session_uuid", tracing::field::display(user.session_uuid));

    state
        .app
        .auth
        .logout(user.session_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
