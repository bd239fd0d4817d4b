//! SQLite store backend.

use crate::error::{StoreError, StoreResult};
use crate::store::Store;
use crate::types::{Account, InventoryItem, NewPurchase};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use tracing::debug;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id       INTEGER PRIMARY KEY,
    name     TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    level    TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS goods (
    id        INTEGER PRIMARY KEY,
    name      TEXT NOT NULL,
    seller_id INTEGER NOT NULL,
    quantity  INTEGER NOT NULL DEFAULT 0,
    lup       INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE IF NOT EXISTS purchases (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    buyer_id      INTEGER NOT NULL,
    merchs_id     INTEGER NOT NULL,
    purchase_item TEXT NOT NULL,
    seller_id     INTEGER NOT NULL,
    quantity      INTEGER NOT NULL,
    lup           INTEGER NOT NULL
);
";

/// The production store backend, backed by a SQLite database file.
///
/// The connection is shared behind a mutex; statements are short and
/// single-row, so contention is bounded by statement latency. Consistency
/// of concurrent writes is delegated to SQLite - the pipeline issues no
/// explicit locking of its own.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path` and ensures the
    /// schema exists.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Opens an ephemeral in-memory database. Used by tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn item_from_row(row: &Row<'_>) -> rusqlite::Result<InventoryItem> {
        Ok(InventoryItem {
            id: row.get(0)?,
            name: row.get(1)?,
            seller_id: row.get(2)?,
            quantity: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }
}

impl Store for SqliteStore {
    fn ping(&self) -> StoreResult<()> {
        self.conn
            .lock()
            .query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .map(|_| ())
            .map_err(|e| StoreError::Unreachable(e.to_string()))
    }

    fn find_account(&self, username: &str, password_hash: &str) -> StoreResult<Option<Account>> {
        debug!(username, "checking account credential");
        let conn = self.conn.lock();
        // Uniqueness of `name` is a schema guarantee; if it were ever
        // violated this silently takes the first row.
        let account = conn
            .query_row(
                "SELECT id, name, level FROM users WHERE name = ?1 AND password = ?2",
                params![username, password_hash],
                |row| {
                    Ok(Account {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        level: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(account)
    }

    fn items_by_seller(&self, seller_id: i64) -> StoreResult<Vec<InventoryItem>> {
        debug!(seller_id, "listing seller inventory");
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, name, seller_id, quantity, lup FROM goods WHERE seller_id = ?1",
        )?;
        let items = stmt
            .query_map(params![seller_id], Self::item_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items)
    }

    fn items_in_stock(&self) -> StoreResult<Vec<InventoryItem>> {
        debug!("listing in-stock inventory");
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, name, seller_id, quantity, lup FROM goods WHERE quantity <> 0",
        )?;
        let items = stmt
            .query_map([], Self::item_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items)
    }

    fn update_item_quantity(
        &self,
        item_id: i64,
        seller_id: i64,
        quantity: i64,
        updated_at: i64,
    ) -> StoreResult<usize> {
        debug!(seller_id, item_id, quantity, "updating item quantity");
        let changed = self.conn.lock().execute(
            "UPDATE goods SET quantity = ?1, lup = ?2 WHERE id = ?3 AND seller_id = ?4",
            params![quantity, updated_at, item_id, seller_id],
        )?;
        Ok(changed)
    }

    fn insert_purchase(&self, purchase: &NewPurchase, at: i64) -> StoreResult<usize> {
        debug!(
            buyer_id = purchase.buyer_id,
            item_id = purchase.item_id,
            "recording purchase"
        );
        let inserted = self.conn.lock().execute(
            "INSERT INTO purchases (buyer_id, merchs_id, purchase_item, seller_id, quantity, lup)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                purchase.buyer_id,
                purchase.item_id,
                purchase.item_label,
                purchase.seller_id,
                purchase.quantity,
                at
            ],
        )?;
        Ok(inserted)
    }
}
