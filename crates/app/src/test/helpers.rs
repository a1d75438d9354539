//! Test Helpers

use jiff::{Span, Timestamp};

use crate::{
    database::Db,
    domain::{
        admin::AdminService,
        brands::{data::NewBrand, records::BrandRecord},
        promotions::{
            data::NewPromotion,
            records::{EventTag, PromoType, PromotionRecord, PromotionUuid},
        },
        stores::{
            data::NewStore,
            records::{StoreRecord, StoreUuid},
        },
        users::{
            PgUsersRepository,
            data::NewUser,
            records::{UserRecord, UserUuid},
        },
    },
    test::TestContext,
};

/// Fixed instant most tests run "at".
pub(crate) fn noon() -> Timestamp {
    "2026-03-10T12:00:00Z".parse().expect("valid timestamp")
}

pub(crate) fn hours(at: Timestamp, hours: i64) -> Timestamp {
    at.checked_add(Span::new().hours(hours))
        .expect("timestamp in range")
}

/// Insert a user directly, skipping password hashing.
pub(crate) async fn create_user(ctx: &TestContext, username: &str) -> UserRecord {
    let db = Db::new(ctx.db.pool().clone());
    let mut tx = db.begin_transaction().await.expect("Failed to begin");

    let credentials = PgUsersRepository::new()
        .create_user(
            &mut tx,
            NewUser {
                uuid: UserUuid::new(),
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password_hash: "$argon2id$placeholder".to_string(),
            },
        )
        .await
        .expect("Failed to create user");

    tx.commit().await.expect("Failed to commit user");

    credentials.user
}

pub(crate) fn new_brand(name: &str) -> NewBrand {
    NewBrand {
        key: name.to_string(),
        display_name: name.to_string(),
        logo_url: None,
        primary_color: None,
        secondary_color: None,
        text_color: None,
        categories: vec!["Coffee".to_string()],
    }
}

/// Create a brand administered by `admin`.
pub(crate) async fn create_brand(ctx: &TestContext, admin: UserUuid, name: &str) -> BrandRecord {
    ctx.admin
        .create_brand(admin, new_brand(name))
        .await
        .expect("Failed to create brand")
}

pub(crate) async fn create_store(
    ctx: &TestContext,
    admin: UserUuid,
    brand_key: &str,
    name: &str,
) -> StoreRecord {
    ctx.admin
        .create_store(
            admin,
            NewStore {
                uuid: StoreUuid::new(),
                brand_key: brand_key.to_string(),
                name: name.to_string(),
                address: format!("{name} street 1"),
                lat: Some(25.03),
                lng: Some(121.56),
                region: "Taipei".to_string(),
            },
        )
        .await
        .expect("Failed to create store")
}

/// A draft running from a day before [`noon`] to a week after it.
pub(crate) fn new_promotion(brand_key: &str, title: &str) -> NewPromotion {
    NewPromotion {
        uuid: PromotionUuid::new(),
        brand_key: brand_key.to_string(),
        title: title.to_string(),
        description: format!("{title} description"),
        promo_type: PromoType::Discount,
        event_tag: EventTag::Seasonal,
        start_at: hours(noon(), -24),
        end_at: hours(noon(), 24 * 7),
        need_membership: false,
        need_code: false,
        per_user_limit: 0,
        global_quota: None,
        daily_quota: None,
        stacking_rule: None,
    }
}

pub(crate) async fn create_draft(
    ctx: &TestContext,
    admin: UserUuid,
    promotion: NewPromotion,
) -> PromotionRecord {
    ctx.admin
        .create_promotion(admin, promotion)
        .await
        .expect("Failed to create promotion")
}

pub(crate) async fn create_published(
    ctx: &TestContext,
    admin: UserUuid,
    promotion: NewPromotion,
) -> PromotionRecord {
    let draft = create_draft(ctx, admin, promotion).await;

    ctx.admin
        .publish_promotion(admin, draft.uuid)
        .await
        .expect("Failed to publish promotion")
}

/// Count stored redemption rows for a promotion.
pub(crate) async fn count_redemptions(ctx: &TestContext, promotion: PromotionUuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM promotion_redemptions WHERE promotion_uuid = $1")
        .bind(promotion)
        .fetch_one(ctx.db.pool())
        .await
        .expect("Failed to count redemptions")
}
