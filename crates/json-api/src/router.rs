//! App Router

use salvo::Router;

use crate::{admin, auth, promotions, tracking, users};

/// Every `/api` route. Catalog reads and tracking are open to guests.
pub fn app_router() -> Router {
    Router::with_path("api")
        .push(auth_router())
        .push(promotions_router())
        .push(
            Router::with_path("track")
                .hoop(auth::middleware::optional)
                .post(tracking::handler),
        )
        .push(user_router())
        .push(admin_router())
}

fn auth_router() -> Router {
    Router::with_path("auth")
        .push(Router::with_path("signup").post(auth::signup::handler))
        .push(Router::with_path("login").post(auth::login::handler))
        .push(
            Router::with_path("logout")
                .hoop(auth::middleware::handler)
                .post(auth::logout::handler),
        )
}

fn promotions_router() -> Router {
    Router::with_path("promotions")
        .get(promotions::index::handler)
        .push(Router::with_path("browse").get(promotions::browse::handler))
        .push(Router::with_path("dataset").get(promotions::dataset::handler))
        .push(
            Router::with_path("{promotion}")
                .get(promotions::get::handler)
                .push(
                    Router::with_path("claim")
                        .hoop(auth::middleware::handler)
                        .post(promotions::claim::handler),
                ),
        )
}

fn user_router() -> Router {
    Router::with_path("user")
        .hoop(auth::middleware::handler)
        .push(Router::with_path("profile").get(users::profile::handler))
        .push(
            Router::with_path("favorites/brands")
                .get(users::brand_favorites::index)
                .post(users::brand_favorites::create)
                .delete(users::brand_favorites::clear)
                .push(Router::with_path("{brand_name}").delete(users::brand_favorites::delete)),
        )
        .push(
            Router::with_path("favorites/promotions")
                .get(users::promotion_favorites::index)
                .post(users::promotion_favorites::create)
                .delete(users::promotion_favorites::clear)
                .push(Router::with_path("{promotion}").delete(users::promotion_favorites::delete)),
        )
        .push(Router::with_path("admin-brands").get(users::admin_brands::handler))
        .push(Router::with_path("promotion-usage").get(users::usage::handler))
        .push(Router::with_path("rankings").get(users::rankings::handler))
}

fn admin_router() -> Router {
    Router::with_path("admin")
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("brands")
                .get(admin::brands::index)
                .post(admin::brands::create)
                .push(Router::with_path("{brand_key}").put(admin::brands::update)),
        )
        .push(
            Router::with_path("stores")
                .get(admin::stores::index)
                .post(admin::stores::create)
                .push(Router::with_path("{store}").put(admin::stores::update)),
        )
        .push(
            Router::with_path("promotions")
                .get(admin::promotions::index)
                .post(admin::promotions::create)
                .push(
                    Router::with_path("{promotion}")
                        .put(admin::promotions::update)
                        .push(Router::with_path("publish").post(admin::lifecycle::publish))
                        .push(Router::with_path("cancel").post(admin::lifecycle::cancel))
                        .push(Router::with_path("quota").get(admin::quota::handler))
                        .push(
                            Router::with_path("exclusions")
                                .get(admin::exclusions::index)
                                .put(admin::exclusions::replace),
                        ),
                ),
        )
}
