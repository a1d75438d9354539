//! Store Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use promoradar_app::domain::stores::records::StoreRecord;

/// Store Response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoreResponse {
    pub store_id: Uuid,
    pub brand_name: String,
    pub name: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub region: String,
    pub is_active: bool,
}

impl From<StoreRecord> for StoreResponse {
    fn from(store: StoreRecord) -> Self {
        Self {
            store_id: store.uuid.into_uuid(),
            brand_name: store.brand_key,
            name: store.name,
            address: store.address,
            lat: store.lat,
            lng: store.lng,
            region: store.region,
            is_active: store.is_active,
        }
    }
}

/// Store List Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StoreListResponse {
    pub items: Vec<StoreResponse>,
}

impl From<Vec<StoreRecord>> for StoreListResponse {
    fn from(stores: Vec<StoreRecord>) -> Self {
        Self {
            items: stores.into_iter().map(Into::into).collect(),
        }
    }
}
