//! Request handlers for the pipeline endpoints.
//!
//! [`RequestHandler`] is transport-agnostic: it takes a decoded request
//! and returns either a success envelope or a [`ServerError`]; the HTTP
//! layer owns the wrapping, statuses and logging. One method per
//! endpoint, each issuing exactly one store statement after its own
//! reachability check.

use crate::auth::{self, require_role};
use crate::config::ServerConfig;
use crate::error::{Operation, ServerError, ServerResult};
use merchd_envelope::{Credentials, LoginRequest, PurchaseRequest, ResponseEnvelope, UpdateRequest};
use merchd_store::{Account, InventoryItem, NewPurchase, Role, Store};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

/// Current unix timestamp in seconds.
fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Context for request handling.
pub struct HandlerContext {
    /// Server configuration.
    pub config: ServerConfig,
    /// The injected data store, shared across all requests.
    pub store: Arc<dyn Store>,
}

impl HandlerContext {
    /// Creates a new handler context.
    pub fn new(config: ServerConfig, store: Arc<dyn Store>) -> Self {
        Self { config, store }
    }
}

/// Handler for the five pipeline endpoints.
pub struct RequestHandler {
    context: Arc<HandlerContext>,
}

impl RequestHandler {
    /// Creates a new request handler.
    pub fn new(context: Arc<HandlerContext>) -> Self {
        Self { context }
    }

    /// The context this handler serves from.
    pub fn context(&self) -> &HandlerContext {
        &self.context
    }

    /// Digests the password and verifies the credential pair.
    fn authenticate(&self, credentials: &Credentials) -> ServerResult<Account> {
        let digest = auth::sha256_hex(&credentials.password);
        auth::verify(self.context.store.as_ref(), &credentials.user, &digest)
    }

    /// Re-checks store reachability ahead of a domain statement.
    ///
    /// The original contract verified connectivity once per operation;
    /// with a shared store handle this keeps that behavior observable.
    fn checked_store(&self, operation: Operation) -> ServerResult<&dyn Store> {
        let store = self.context.store.as_ref();
        store
            .ping()
            .map_err(|source| ServerError::Store { operation, source })?;
        Ok(store)
    }

    /// Handles `/login`: any valid credential is admitted.
    pub fn login(&self, request: &LoginRequest) -> ServerResult<ResponseEnvelope> {
        let account = self.authenticate(&request.account)?;
        info!(user_id = account.id, "account authenticated");
        Ok(ResponseEnvelope::success(vec![json!({
            "status": "login success",
            "userId": account.id,
            "level": account.level,
        })]))
    }

    /// Handles `/merchs`: a seller listing its own inventory.
    pub fn own_inventory(&self, request: &LoginRequest) -> ServerResult<ResponseEnvelope> {
        let account = self.authenticate(&request.account)?;
        require_role(&account, Role::Seller)?;

        let store = self.checked_store(Operation::ListOwn)?;
        let items = store
            .items_by_seller(account.id)
            .map_err(|source| ServerError::Store {
                operation: Operation::ListOwn,
                source,
            })?;
        if items.is_empty() {
            return Err(ServerError::EmptyResult);
        }

        info!(seller_id = account.id, count = items.len(), "listed own inventory");
        Ok(listing_envelope(&items, false))
    }

    /// Handles `/merchsupdate`: a seller setting one of its items'
    /// quantity. The statement is scoped to the caller's own rows, so an
    /// attempt on another seller's item changes nothing and fails.
    pub fn update_quantity(&self, request: &UpdateRequest) -> ServerResult<ResponseEnvelope> {
        let account = self.authenticate(&request.account)?;
        require_role(&account, Role::Seller)?;

        let store = self.checked_store(Operation::UpdateQuantity)?;
        let changed = store
            .update_item_quantity(
                request.update.merchs_id,
                account.id,
                request.update.quantity,
                unix_now(),
            )
            .map_err(|source| ServerError::Store {
                operation: Operation::UpdateQuantity,
                source,
            })?;
        if changed == 0 {
            return Err(ServerError::NoRowsAffected);
        }

        info!(
            seller_id = account.id,
            item_id = request.update.merchs_id,
            quantity = request.update.quantity,
            "updated item quantity"
        );
        Ok(ResponseEnvelope::success(vec![json!({
            "status": "update merchs success",
            "update": format!("{changed} rows updated"),
        })]))
    }

    /// Handles `/allmerchs`: a buyer browsing in-stock items across all
    /// sellers.
    pub fn available_inventory(&self, request: &LoginRequest) -> ServerResult<ResponseEnvelope> {
        let account = self.authenticate(&request.account)?;
        require_role(&account, Role::Buyer)?;

        let store = self.checked_store(Operation::ListAvailable)?;
        let items = store.items_in_stock().map_err(|source| ServerError::Store {
            operation: Operation::ListAvailable,
            source,
        })?;
        if items.is_empty() {
            return Err(ServerError::EmptyResult);
        }

        info!(buyer_id = account.id, count = items.len(), "listed available inventory");
        Ok(listing_envelope(&items, true))
    }

    /// Handles `/purchase`: a buyer recording one purchase row.
    pub fn purchase(&self, request: &PurchaseRequest) -> ServerResult<ResponseEnvelope> {
        let account = self.authenticate(&request.account)?;
        require_role(&account, Role::Buyer)?;

        let store = self.checked_store(Operation::RecordPurchase)?;
        let purchase = NewPurchase {
            buyer_id: account.id,
            item_id: request.purchase.merchs_id,
            item_label: request.purchase.purchase_item.clone(),
            seller_id: request.purchase.seller_id,
            quantity: request.purchase.quantity,
        };
        let inserted = store
            .insert_purchase(&purchase, unix_now())
            .map_err(|source| ServerError::Store {
                operation: Operation::RecordPurchase,
                source,
            })?;
        if inserted == 0 {
            return Err(ServerError::InsertFailed);
        }

        info!(
            buyer_id = account.id,
            item_id = purchase.item_id,
            "recorded purchase"
        );
        Ok(ResponseEnvelope::success(vec![json!({
            "status": "purchase merchs success",
            "merchs": inserted,
        })]))
    }
}

/// Builds the listing success envelope.
///
/// Own listings omit the seller id (the caller is the seller); the
/// buyer-facing browse includes it, matching the original column sets.
fn listing_envelope(items: &[InventoryItem], with_seller: bool) -> ResponseEnvelope {
    let records: Vec<Value> = items
        .iter()
        .map(|item| {
            if with_seller {
                json!({
                    "id": item.id,
                    "name": item.name,
                    "seller_id": item.seller_id,
                    "quantity": item.quantity,
                })
            } else {
                json!({
                    "id": item.id,
                    "name": item.name,
                    "quantity": item.quantity,
                })
            }
        })
        .collect();

    ResponseEnvelope::success(vec![json!({
        "status": "listing merchs success",
        "merchs": records,
    })])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::sha256_hex;
    use merchd_envelope::{Message, PurchaseOrder, UpdateOrder};
    use merchd_store::MemoryStore;

    fn seeded_store() -> Arc<MemoryStore> {
        let store = MemoryStore::new();
        store.add_account(1, "alice", &sha256_hex("wonderland"), "BUYER");
        store.add_account(7, "bob", &sha256_hex("builder"), "SELLER");
        store.add_account(9, "dan", &sha256_hex("dealer"), "SELLER");
        store.add_account(13, "eve", &sha256_hex("listener"), "ADMIN");
        store.add_item(42, "teapot", 9, 3);
        store.add_item(44, "tray", 7, 12);
        store.add_item(45, "kettle", 7, 0);
        Arc::new(store)
    }

    fn handler_with(store: Arc<MemoryStore>) -> RequestHandler {
        let context = Arc::new(HandlerContext::new(ServerConfig::default(), store));
        RequestHandler::new(context)
    }

    fn credentials(user: &str, password: &str) -> Credentials {
        Credentials::new(user, password)
    }

    fn records(envelope: &ResponseEnvelope) -> &[Value] {
        match &envelope.message {
            Message::Records(records) => records,
            Message::Text(text) => panic!("expected records, got text: {text}"),
        }
    }

    #[test]
    fn login_returns_user_id_and_level() {
        let handler = handler_with(seeded_store());
        let request = LoginRequest::new(credentials("alice", "wonderland"));

        let envelope = handler.login(&request).unwrap();
        assert!(envelope.response);
        assert_eq!(envelope.code, 200);
        let record = &records(&envelope)[0];
        assert_eq!(record["status"], json!("login success"));
        assert_eq!(record["userId"], json!(1));
        assert_eq!(record["level"], json!("BUYER"));
    }

    #[test]
    fn login_rejects_bad_password() {
        let handler = handler_with(seeded_store());
        let request = LoginRequest::new(credentials("alice", "wrong"));

        let err = handler.login(&request).unwrap_err();
        assert_eq!(err.status(), 404);
        assert_eq!(err.wire_message(), "account not authenticated");
    }

    #[test]
    fn login_admits_any_role() {
        // Even the unknown ADMIN level can log in; only role-gated
        // operations fail closed.
        let handler = handler_with(seeded_store());
        let request = LoginRequest::new(credentials("eve", "listener"));
        let envelope = handler.login(&request).unwrap();
        assert_eq!(records(&envelope)[0]["level"], json!("ADMIN"));
    }

    #[test]
    fn own_inventory_lists_only_callers_items() {
        let handler = handler_with(seeded_store());
        let request = LoginRequest::new(credentials("bob", "builder"));

        let envelope = handler.own_inventory(&request).unwrap();
        let record = &records(&envelope)[0];
        assert_eq!(record["status"], json!("listing merchs success"));
        let merchs = record["merchs"].as_array().unwrap();
        assert_eq!(merchs.len(), 2);
        // Own listing rows carry id, name, quantity - no seller_id.
        assert!(merchs[0].get("seller_id").is_none());
    }

    #[test]
    fn own_inventory_requires_seller() {
        let handler = handler_with(seeded_store());
        let request = LoginRequest::new(credentials("alice", "wonderland"));

        let err = handler.own_inventory(&request).unwrap_err();
        assert_eq!(err.status(), 406);
        assert_eq!(err.wire_message(), "account not seller");
    }

    #[test]
    fn own_inventory_empty_is_an_error() {
        let store = Arc::new(MemoryStore::new());
        store.add_account(7, "bob", &sha256_hex("builder"), "SELLER");
        let handler = handler_with(store);

        let request = LoginRequest::new(credentials("bob", "builder"));
        let err = handler.own_inventory(&request).unwrap_err();
        assert_eq!(err.status(), 404);
        assert_eq!(err.wire_message(), "cannot get merchs list");
    }

    #[test]
    fn update_quantity_own_item() {
        let store = seeded_store();
        let handler = handler_with(Arc::clone(&store));
        let request = UpdateRequest {
            account: credentials("bob", "builder"),
            update: UpdateOrder {
                merchs_id: 44,
                quantity: 5,
            },
        };

        let envelope = handler.update_quantity(&request).unwrap();
        let record = &records(&envelope)[0];
        assert_eq!(record["status"], json!("update merchs success"));
        assert_eq!(record["update"], json!("1 rows updated"));
        assert_eq!(store.item(44).unwrap().quantity, 5);
    }

    #[test]
    fn update_quantity_foreign_item_affects_nothing() {
        // Item 42 belongs to seller 9; bob is seller 7.
        let store = seeded_store();
        let handler = handler_with(Arc::clone(&store));
        let request = UpdateRequest {
            account: credentials("bob", "builder"),
            update: UpdateOrder {
                merchs_id: 42,
                quantity: 5,
            },
        };

        let err = handler.update_quantity(&request).unwrap_err();
        assert_eq!(err.status(), 404);
        assert_eq!(err.wire_message(), "merchs update failed");
        assert_eq!(store.item(42).unwrap().quantity, 3);
    }

    #[test]
    fn update_quantity_requires_seller() {
        let handler = handler_with(seeded_store());
        let request = UpdateRequest {
            account: credentials("alice", "wonderland"),
            update: UpdateOrder {
                merchs_id: 44,
                quantity: 5,
            },
        };

        let err = handler.update_quantity(&request).unwrap_err();
        assert_eq!(err.wire_message(), "account not seller");
    }

    #[test]
    fn available_inventory_excludes_out_of_stock() {
        let handler = handler_with(seeded_store());
        let request = LoginRequest::new(credentials("alice", "wonderland"));

        let envelope = handler.available_inventory(&request).unwrap();
        let record = &records(&envelope)[0];
        let merchs = record["merchs"].as_array().unwrap();
        let ids: Vec<i64> = merchs.iter().map(|m| m["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![42, 44]);
        // Browse rows carry the seller id.
        assert_eq!(merchs[0]["seller_id"], json!(9));
    }

    #[test]
    fn available_inventory_requires_buyer() {
        let handler = handler_with(seeded_store());
        let request = LoginRequest::new(credentials("bob", "builder"));

        let err = handler.available_inventory(&request).unwrap_err();
        assert_eq!(err.status(), 406);
        assert_eq!(err.wire_message(), "account not buyer");
    }

    #[test]
    fn unknown_level_fails_every_role_gate() {
        let handler = handler_with(seeded_store());
        let request = LoginRequest::new(credentials("eve", "listener"));

        assert!(handler.own_inventory(&request).is_err());
        assert!(handler.available_inventory(&request).is_err());
    }

    #[test]
    fn purchase_records_one_row() {
        let store = seeded_store();
        let handler = handler_with(Arc::clone(&store));
        let request = PurchaseRequest {
            account: credentials("alice", "wonderland"),
            purchase: PurchaseOrder {
                merchs_id: 42,
                purchase_item: "teapot".to_string(),
                seller_id: 9,
                quantity: 2,
            },
        };

        let envelope = handler.purchase(&request).unwrap();
        let record = &records(&envelope)[0];
        assert_eq!(record["status"], json!("purchase merchs success"));
        assert_eq!(record["merchs"], json!(1));

        let recorded = store.purchases();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].purchase.buyer_id, 1);
        assert_eq!(recorded[0].purchase.item_id, 42);
        assert_eq!(recorded[0].purchase.seller_id, 9);
        assert!(recorded[0].at > 0);
    }

    #[test]
    fn purchase_requires_buyer() {
        let handler = handler_with(seeded_store());
        let request = PurchaseRequest {
            account: credentials("bob", "builder"),
            purchase: PurchaseOrder {
                merchs_id: 42,
                purchase_item: "teapot".to_string(),
                seller_id: 9,
                quantity: 2,
            },
        };

        let err = handler.purchase(&request).unwrap_err();
        assert_eq!(err.wire_message(), "account not buyer");
    }

    #[test]
    fn unreachable_store_fails_authentication() {
        let store = seeded_store();
        store.set_unreachable(true);
        let handler = handler_with(store);

        let request = LoginRequest::new(credentials("alice", "wonderland"));
        let err = handler.login(&request).unwrap_err();
        assert_eq!(err.status(), 404);
        assert_eq!(err.wire_message(), "account not authenticated");
    }
}
