//! Typed request schemas, one per endpoint.
//!
//! Field names are pinned to the existing wire contract (`merchsId`,
//! `purchaseItem`, ...). Numeric fields arrive as JSON numbers that
//! existing clients send as floats; they are truncated toward zero at
//! decode time, with no rounding and no range validation.

use serde::{Deserialize, Deserializer, Serialize};

/// Deserializes a wire number as an integer, truncating any fraction.
fn truncated<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(raw as i64)
}

/// Account credentials carried by every authenticated request.
///
/// `password` is the raw password as typed by the user; it is digested
/// before ever reaching the store and must never be logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Username.
    pub user: String,
    /// Raw (un-hashed) password.
    pub password: String,
}

impl Credentials {
    /// Creates credentials from a username and raw password.
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

/// Request body for `/login`, `/merchs` and `/allmerchs`.
///
/// The listing endpoints carry no payload beyond the credentials, so they
/// share the login shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Caller credentials.
    pub account: Credentials,
}

impl LoginRequest {
    /// Creates a login request.
    pub fn new(account: Credentials) -> Self {
        Self { account }
    }
}

/// Quantity update payload nested under `update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOrder {
    /// Target inventory item id.
    #[serde(rename = "merchsId", deserialize_with = "truncated")]
    pub merchs_id: i64,
    /// New quantity for the item.
    #[serde(deserialize_with = "truncated")]
    pub quantity: i64,
}

/// Request body for `/merchsupdate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRequest {
    /// Caller credentials.
    pub account: Credentials,
    /// The quantity update to apply.
    pub update: UpdateOrder,
}

/// Purchase payload nested under `purchase`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// Purchased inventory item id.
    #[serde(rename = "merchsId", deserialize_with = "truncated")]
    pub merchs_id: i64,
    /// Display label of the purchased item.
    #[serde(rename = "purchaseItem")]
    pub purchase_item: String,
    /// Id of the seller the item belongs to.
    #[serde(rename = "sellerId", deserialize_with = "truncated")]
    pub seller_id: i64,
    /// Purchased quantity.
    #[serde(deserialize_with = "truncated")]
    pub quantity: i64,
}

/// Request body for `/purchase`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    /// Caller credentials.
    pub account: Credentials,
    /// The purchase to record.
    pub purchase: PurchaseOrder,
}
