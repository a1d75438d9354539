//! Login Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use promoradar_app::auth::models::Credentials;

use crate::{
    auth::{errors::into_status_error, handlers::SessionResponse},
    extensions::*,
    state::State,
};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login Handler
#[endpoint(
    tags("auth"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::OK, description = "Signed in"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid email or password"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "auth.login", skip(json, depot), fields(user_uuid = tracing::field::Empty), err)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let session = state
        .app
        .auth
        .login(
            Credentials {
                email: request.email,
                password: request.password,
            },
            Timestamp::now(),
        )
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("user_uuid", tracing::field::display(session.user.uuid));

    Ok(Json(session.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use promoradar_app::auth::AuthServiceError;

    use crate::{auth::handlers::tests::make_session, errors::ErrorResponse, test_helpers::Mocks};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.guest_service(Router::with_path("auth/login").post(handler))
    }

    #[tokio::test]
    async fn test_login_returns_session() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_login()
            .once()
            .withf(|credentials, _| {
                credentials.email == "ana@example.com" && credentials.password == "secret1"
            })
            .return_once(|_, _| Ok(make_session("ana")));

        let mut res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "ana@example.com", "password": "secret1" }))
            .send(&make_service(mocks))
            .await;

        let body: SessionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.user.email, "ana@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_bad_credentials_return_401() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_login()
            .once()
            .return_once(|_, _| Err(AuthServiceError::InvalidCredentials));

        let mut res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "ana@example.com", "password": "wrong" }))
            .send(&make_service(mocks))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(body.message, "Invalid email or password");

        Ok(())
    }
}
