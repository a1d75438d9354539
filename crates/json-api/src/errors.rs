//! JSON error bodies.

use salvo::{catcher::Catcher, http::ResBody, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Error Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    /// Human readable reason
    pub message: String,
}

/// Render every 4xx/5xx response as `{"message": ...}`.
#[handler]
pub(crate) async fn json_errors(res: &mut Response, ctrl: &mut FlowCtrl) {
    let Some(status) = res.status_code else {
        return;
    };

    if !status.is_client_error() && !status.is_server_error() {
        return;
    }

    let message = match &res.body {
        ResBody::Error(error) if !error.brief.is_empty() => error.brief.clone(),
        _ => status.canonical_reason().unwrap_or("Error").to_owned(),
    };

    res.replace_body(ResBody::None);
    res.render(Json(ErrorResponse { message }));

    ctrl.skip_rest();
}

pub(crate) fn catcher() -> Catcher {
    Catcher::default().hoop(json_errors)
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn conflict() -> Result<(), StatusError> {
        Err(StatusError::conflict().brief("Brand already exists"))
    }

    #[handler]
    async fn ok() -> &'static str {
        "fine"
    }

    fn make_service() -> Service {
        Service::new(
            Router::new()
                .push(Router::with_path("conflict").get(conflict))
                .push(Router::with_path("ok").get(ok)),
        )
        .catcher(catcher())
    }

    #[tokio::test]
    async fn status_errors_become_json_messages() -> TestResult {
        let mut res = TestClient::get("http://example.com/conflict")
            .send(&make_service())
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
        assert_eq!(body.message, "Brand already exists");

        Ok(())
    }

    #[tokio::test]
    async fn unknown_routes_get_a_json_404() -> TestResult {
        let mut res = TestClient::get("http://example.com/missing")
            .send(&make_service())
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert!(!body.message.is_empty(), "expected a message");

        Ok(())
    }

    #[tokio::test]
    async fn successful_responses_are_untouched() -> TestResult {
        let mut res = TestClient::get("http://example.com/ok")
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "fine");

        Ok(())
    }
}
