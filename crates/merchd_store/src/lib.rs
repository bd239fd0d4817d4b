//! # merchd Store
//!
//! Data-store abstraction for merchd.
//!
//! The server core talks to the relational store through the narrow
//! [`Store`] trait: a reachability check plus one typed method per
//! statement the pipeline issues. Two implementations are provided:
//!
//! - [`SqliteStore`] - the production backend (SQLite via rusqlite)
//! - [`MemoryStore`] - an in-memory double for tests, with a
//!   reachability switch for exercising store-down paths
//!
//! ## Design
//!
//! - One method per statement; no statement strings cross the seam
//! - All statements are parameterized; callers never build SQL
//! - Accounts are matched on username AND password digest in the store,
//!   so plaintext credentials never reach this crate
//! - Implementations are `Send + Sync`; concurrent writes resolve to
//!   last-writer-wins at the statement level

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod memory;
mod sqlite;
mod store;
mod types;

pub use error::{StoreError, StoreResult};
pub use memory::{MemoryStore, RecordedPurchase};
pub use sqlite::SqliteStore;
pub use store::Store;
pub use types::{Account, InventoryItem, NewPurchase, Role};
