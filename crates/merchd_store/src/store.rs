//! Store trait definition.

use crate::error::StoreResult;
use crate::types::{Account, InventoryItem, NewPurchase};

/// The narrow seam between the request pipeline and the relational store.
///
/// One method per statement the pipeline issues; nothing else crosses.
/// Every operation the server runs performs its own [`Store::ping`]
/// before its statement, preserving the per-request reachability check
/// of the original contract.
///
/// # Invariants
///
/// - `find_account` returns at most one account; on a (schema-forbidden)
///   duplicate, the first row wins
/// - `update_item_quantity` only touches rows matching BOTH the item id
///   and the owning seller id
/// - `insert_purchase` appends exactly one row or fails
/// - Implementations must be `Send + Sync`; requests run concurrently
///
/// # Implementors
///
/// - [`crate::SqliteStore`] - production backend
/// - [`crate::MemoryStore`] - test double
pub trait Store: Send + Sync {
    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError::Unreachable`] if the check fails.
    fn ping(&self) -> StoreResult<()>;

    /// Looks up the account matching both username and password digest.
    ///
    /// Returns `Ok(None)` when no row matches. The digest is compared
    /// verbatim; hashing happens in the caller.
    fn find_account(&self, username: &str, password_hash: &str) -> StoreResult<Option<Account>>;

    /// Lists all items owned by the given seller, in-stock or not.
    fn items_by_seller(&self, seller_id: i64) -> StoreResult<Vec<InventoryItem>>;

    /// Lists all items with non-zero quantity, across all sellers.
    fn items_in_stock(&self) -> StoreResult<Vec<InventoryItem>>;

    /// Sets an item's quantity and last-update timestamp, scoped to rows
    /// where both the item id and the owning seller id match.
    ///
    /// Returns the number of rows changed (0 or 1).
    fn update_item_quantity(
        &self,
        item_id: i64,
        seller_id: i64,
        quantity: i64,
        updated_at: i64,
    ) -> StoreResult<usize>;

    /// Records one purchase with the given timestamp.
    ///
    /// Returns the number of rows inserted (1 on success).
    fn insert_purchase(&self, purchase: &NewPurchase, at: i64) -> StoreResult<usize>;
}
