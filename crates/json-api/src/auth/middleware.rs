//! Bearer session middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use promoradar_app::auth::{AuthServiceError, models::AuthenticatedUser};

use crate::{auth::errors::INVALID_TOKEN, extensions::*, state::State};

/// Reject requests without a valid session token.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing authorization header"));
        ctrl.skip_rest();

        return;
    };

    match authenticate(depot, token).await {
        Ok(user) => {
            depot.insert_current_user(user);

            ctrl.call_next(req, depot, res).await;
        }
        Err(status) => {
            res.render(status);
            ctrl.skip_rest();
        }
    }
}

/// Attach the caller when a valid token is sent; anonymous requests and
/// invalid tokens continue as guests.
#[salvo::handler]
pub(crate) async fn optional(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if let Some(token) = extract_bearer_token(req)
        && let Ok(user) = authenticate(depot, token).await
    {
        depot.insert_current_user(user);
    }

    ctrl.call_next(req, depot, res).await;
}

async fn authenticate(depot: &Depot, token: String) -> Result<AuthenticatedUser, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    match state.app.auth.authenticate_bearer(&token).await {
        Ok(user) => Ok(user),
        Err(AuthServiceError::Unauthorized | AuthServiceError::NotFound) => {
            Err(StatusError::unauthorized().brief(INVALID_TOKEN))
        }
        Err(source) => {
            error!("failed to validate session token: {source}");

            Err(StatusError::internal_server_error())
        }
    }
}

fn extract_bearer_token(req: &Request) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token.to_owned())
}
