//! Domain types owned by the store.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two mutually exclusive account roles gating operation access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// May list and update its own inventory.
    #[serde(rename = "SELLER")]
    Seller,
    /// May browse available inventory and record purchases.
    #[serde(rename = "BUYER")]
    Buyer,
}

impl Role {
    /// Parses a stored level string.
    ///
    /// Anything other than the two known values yields `None`, so
    /// authorization against an unknown level fails closed.
    pub fn parse(level: &str) -> Option<Role> {
        match level {
            "SELLER" => Some(Role::Seller),
            "BUYER" => Some(Role::Buyer),
            _ => None,
        }
    }

    /// The wire/storage spelling of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Seller => "SELLER",
            Role::Buyer => "BUYER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An account row, minus its credential digest.
///
/// Accounts are created externally and read-only here. The `level` field
/// carries the raw stored string; use [`Account::role`] for authorization
/// so unknown levels never pass a role check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Account id.
    pub id: i64,
    /// Username.
    pub name: String,
    /// Raw stored level string (`SELLER`, `BUYER`, or anything else).
    pub level: String,
}

impl Account {
    /// The parsed role, or `None` for an unrecognized level.
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.level)
    }
}

/// A sellable good, quantity-tracked per seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Item id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Owning seller's account id.
    pub seller_id: i64,
    /// Units in stock; never negative in a well-formed store.
    pub quantity: i64,
    /// Last-update unix timestamp, seconds.
    pub updated_at: i64,
}

/// A purchase to be recorded; the store adds the timestamp row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPurchase {
    /// Buying account id.
    pub buyer_id: i64,
    /// Purchased item id.
    pub item_id: i64,
    /// Display label of the purchased item, as sent by the client.
    pub item_label: String,
    /// Selling account id.
    pub seller_id: i64,
    /// Purchased quantity.
    pub quantity: i64,
}
