//! In-memory store for testing.

use crate::error::{StoreError, StoreResult};
use crate::store::Store;
use crate::types::{Account, InventoryItem, NewPurchase};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone)]
struct AccountRow {
    account: Account,
    password_hash: String,
}

/// A recorded purchase, as the in-memory store keeps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPurchase {
    /// The purchase as submitted.
    pub purchase: NewPurchase,
    /// Timestamp the purchase was recorded with.
    pub at: i64,
}

#[derive(Debug, Default)]
struct Inner {
    accounts: Vec<AccountRow>,
    items: Vec<InventoryItem>,
    purchases: Vec<RecordedPurchase>,
}

/// An in-memory store.
///
/// Holds the same three tables as the SQLite backend in plain vectors.
/// Suitable for unit and integration tests; the reachability switch lets
/// tests exercise store-down paths without a real network.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    unreachable: AtomicBool,
}

impl MemoryStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an account row.
    pub fn add_account(&self, id: i64, name: &str, password_hash: &str, level: &str) {
        self.inner.write().accounts.push(AccountRow {
            account: Account {
                id,
                name: name.to_string(),
                level: level.to_string(),
            },
            password_hash: password_hash.to_string(),
        });
    }

    /// Seeds an inventory item.
    pub fn add_item(&self, id: i64, name: &str, seller_id: i64, quantity: i64) {
        self.inner.write().items.push(InventoryItem {
            id,
            name: name.to_string(),
            seller_id,
            quantity,
            updated_at: 0,
        });
    }

    /// Flips the reachability switch; when unreachable every operation
    /// fails its ping.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Returns a snapshot of all recorded purchases.
    pub fn purchases(&self) -> Vec<RecordedPurchase> {
        self.inner.read().purchases.clone()
    }

    /// Returns a snapshot of an item by id, if present.
    pub fn item(&self, id: i64) -> Option<InventoryItem> {
        self.inner.read().items.iter().find(|i| i.id == id).cloned()
    }
}

impl Store for MemoryStore {
    fn ping(&self) -> StoreResult<()> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(StoreError::Unreachable("memory store marked down".into()));
        }
        Ok(())
    }

    fn find_account(&self, username: &str, password_hash: &str) -> StoreResult<Option<Account>> {
        // First match wins, mirroring the SQL backend on a duplicate.
        Ok(self
            .inner
            .read()
            .accounts
            .iter()
            .find(|row| row.account.name == username && row.password_hash == password_hash)
            .map(|row| row.account.clone()))
    }

    fn items_by_seller(&self, seller_id: i64) -> StoreResult<Vec<InventoryItem>> {
        Ok(self
            .inner
            .read()
            .items
            .iter()
            .filter(|item| item.seller_id == seller_id)
            .cloned()
            .collect())
    }

    fn items_in_stock(&self) -> StoreResult<Vec<InventoryItem>> {
        Ok(self
            .inner
            .read()
            .items
            .iter()
            .filter(|item| item.quantity != 0)
            .cloned()
            .collect())
    }

    fn update_item_quantity(
        &self,
        item_id: i64,
        seller_id: i64,
        quantity: i64,
        updated_at: i64,
    ) -> StoreResult<usize> {
        let mut inner = self.inner.write();
        let mut changed = 0;
        for item in inner
            .items
            .iter_mut()
            .filter(|item| item.id == item_id && item.seller_id == seller_id)
        {
            item.quantity = quantity;
            item.updated_at = updated_at;
            changed += 1;
        }
        Ok(changed)
    }

    fn insert_purchase(&self, purchase: &NewPurchase, at: i64) -> StoreResult<usize> {
        self.inner.write().purchases.push(RecordedPurchase {
            purchase: purchase.clone(),
            at,
        });
        Ok(1)
    }
}
