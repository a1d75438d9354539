//! Stores Data

use crate::domain::stores::records::StoreUuid;

/// New Store Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewStore {
    pub uuid: StoreUuid,
    pub brand_key: String,
    pub name: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub region: String,
}

/// Store Update Data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreUpdate {
    pub brand_key: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub region: Option<String>,
    pub is_active: Option<bool>,
}
