//! Signup Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use promoradar_app::auth::models::Signup;

use crate::{
    auth::{errors::into_status_error, handlers::SessionResponse},
    extensions::*,
    state::State,
};

/// Signup Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl From<SignupRequest> for Signup {
    fn from(request: SignupRequest) -> Self {
        Signup {
            username: request.username,
            email: request.email,
            password: request.password,
        }
    }
}

/// Signup Handler
///
/// Registers an account and signs it in.
#[endpoint(
    tags("auth"),
    summary = "Sign Up",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "auth.signup", skip(json, depot, res), fields(user_uuid = tracing::field::Empty), err)]
pub(crate) async fn handler(
    json: JsonBody<SignupRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let session = state
        .app
        .auth
        .signup(json.into_inner().into(), Timestamp::now())
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("user_uuid", tracing::field::display(session.user.uuid));

    res.status_code(StatusCode::CREATED);

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
        mocks.guest_service(Router::with_path("auth/signup").post(handler))
    }

    #[tokio::test]
    async fn test_signup_returns_201_with_token() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_signup()
            .once()
            .withf(|signup, _| {
                signup.username == "ana"
                    && signup.email == "ana@example.com"
                    && signup.password == "secret1"
            })
            .return_once(|_, _| Ok(make_session("ana")));

        let mut res = TestClient::post("http://example.com/auth/signup")
            .json(&json!({ "username": "ana", "email": "ana@example.com", "password": "secret1" }))
            .send(&make_service(mocks))
            .await;

        let body: SessionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert!(body.token.starts_with("pr_v1_"));
        assert_eq!(body.user.username, "ana");

        Ok(())
    }

    #[tokio::test]
    async fn test_taken_email_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_signup()
            .once()
            .return_once(|_, _| Err(AuthServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/auth/signup")
            .json(&json!({ "username": "ana", "email": "ana@example.com", "password": "secret1" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_validation_message_is_returned() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.auth.expect_signup().once().return_once(|_, _| {
            Err(AuthServiceError::Validation(
                "password must be at least 6 characters".to_string(),
            ))
        });

        let mut res = TestClient::post("http://example.com/auth/signup")
            .json(&json!({ "username": "ana", "email": "ana@example.com", "password": "123" }))
            .send(&make_service(mocks))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "password must be at least 6 characters");

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_body_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.auth.expect_signup().never();

        let res = TestClient::post("http://example.com/auth/signup")
            .json(&json!({ "username": "ana" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
