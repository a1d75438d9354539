//! Store Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Store UUID
pub type StoreUuid = TypedUuid<StoreRecord>;

/// Store Record
#[derive(Debug, Clone, PartialEq)]
pub struct StoreRecord {
    pub uuid: StoreUuid,
    pub brand_key: String,
    pub name: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub region: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
