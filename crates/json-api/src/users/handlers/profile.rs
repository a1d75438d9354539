//! Profile Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*, responses::ProfileResponse, state::State, users::errors::into_status_error,
};

/// Profile Handler
///
/// The caller with their favorites, managed brands and promotion usage.
#[endpoint(
    tags("user"),
    summary = "Get Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let profile = state
        .app
        .users
        .get_profile(user.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(profile.into()))
}
