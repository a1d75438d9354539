//! Admin Brands Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*, responses::BrandNamesResponse, state::State, users::errors::into_status_error,
};

/// Admin Brands Handler
///
/// Keys of the brands the caller administers.
#[endpoint(tags("user"), summary = "List Administered Brands", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<BrandNamesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let items = state
        .app
        .users
        .list_admin_brands(user.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(BrandNamesResponse { items }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_USER_UUID};

    use super::*;

    #[tokio::test]
    async fn test_lists_managed_brand_keys() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_list_admin_brands()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|_| Ok(vec!["cafe".to_string()]));

        let mut res = TestClient::get("http://example.com/user/admin-brands")
            .send(&mocks.service(Router::with_path("user/admin-brands").get(handler)))
            .await;

        let body: BrandNamesResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.items, vec!["cafe".to_string()]);

        Ok(())
    }
}
