//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use promoradar_app::{
    auth::{
        MockAuthService,
        models::{AuthenticatedUser, SessionUuid},
    },
    context::AppContext,
    domain::{
        admin::service::MockAdminService,
        brands::records::BrandRecord,
        promotions::{
            records::{EventTag, PromoType, PromotionRecord, PromotionStatus, PromotionUuid},
            service::MockPromotionsService,
        },
        redemptions::service::MockRedemptionsService,
        stores::records::{StoreRecord, StoreUuid},
        tracking::service::MockTrackingService,
        users::{
            records::{UserRecord, UserUuid},
            service::MockUsersService,
        },
    },
};

use crate::{errors, extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid =
    UserUuid::from_uuid(Uuid::from_u128(0x0192_0000_0000_7000_8000_0000_0000_0001));

pub(crate) const TEST_SESSION_UUID: SessionUuid =
    SessionUuid::from_uuid(Uuid::from_u128(0x0192_0000_0000_7000_8000_0000_0000_0002));

pub(crate) fn test_user() -> AuthenticatedUser {
    AuthenticatedUser {
        user_uuid: TEST_USER_UUID,
        session_uuid: TEST_SESSION_UUID,
    }
}

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_current_user(test_user());
    ctrl.call_next(req, depot, res).await;
}

/// One mock per service. Mocks without expectations fail on any call.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) auth: MockAuthService,
    pub(crate) promotions: MockPromotionsService,
    pub(crate) redemptions: MockRedemptionsService,
    pub(crate) admin: MockAdminService,
    pub(crate) users: MockUsersService,
    pub(crate) tracking: MockTrackingService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            auth: Arc::new(self.auth),
            promotions: Arc::new(self.promotions),
            redemptions: Arc::new(self.redemptions),
            admin: Arc::new(self.admin),
            users: Arc::new(self.users),
            tracking: Arc::new(self.tracking),
        })
    }

    /// Serve `route` as the signed-in test user.
    pub(crate) fn service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_user)
                .push(route),
        )
        .catcher(errors::catcher())
    }

    /// Serve `route` without a signed-in user.
    pub(crate) fn guest_service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
            .catcher(errors::catcher())
    }
}

pub(crate) fn make_user(uuid: UserUuid, username: &str) -> UserRecord {
    UserRecord {
        uuid,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        is_admin: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_brand(key: &str) -> BrandRecord {
    BrandRecord {
        key: key.to_string(),
        display_name: key.to_uppercase(),
        logo_url: None,
        primary_color: None,
        secondary_color: None,
        text_color: None,
        categories: vec!["coffee".to_string()],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_store(uuid: StoreUuid, brand_key: &str) -> StoreRecord {
    StoreRecord {
        uuid,
        brand_key: brand_key.to_string(),
        name: "Main Street".to_string(),
        address: "1 Main Street".to_string(),
        lat: Some(25.033),
        lng: Some(121.565),
        region: "north".to_string(),
        is_active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_promotion(uuid: PromotionUuid, status: PromotionStatus) -> PromotionRecord {
    PromotionRecord {
        uuid,
        brand_key: "cafe".to_string(),
        title: "Second cup half price".to_string(),
        description: "Any size".to_string(),
        promo_type: PromoType::SecondCup,
        event_tag: EventTag::LimitedTime,
        start_at: Timestamp::UNIX_EPOCH,
        end_at: Timestamp::MAX,
        need_membership: false,
        need_code: false,
        per_user_limit: 1,
        global_quota: Some(100),
        daily_quota: None,
        stacking_rule: None,
        status,
        creator_uuid: Some(TEST_USER_UUID),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
