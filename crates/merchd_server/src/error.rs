//! Error types for the request pipeline.
//!
//! Every failure is local to one request and resolves to a wire envelope:
//! [`ServerError::status`] picks the HTTP code and
//! [`ServerError::wire_message`] the client-facing message, both pinned to
//! the existing wire contract. Detail for the logs lives in the `Display`
//! impls; the client only ever sees the short generic messages.

use merchd_envelope::EnvelopeError;
use merchd_store::{Role, StoreError};
use std::fmt;
use thiserror::Error;

/// Result type for pipeline operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// The domain operation a store failure occurred in; selects the wire
/// message for [`ServerError::Store`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Seller listing its own inventory.
    ListOwn,
    /// Seller updating an item quantity.
    UpdateQuantity,
    /// Buyer browsing available inventory.
    ListAvailable,
    /// Buyer recording a purchase.
    RecordPurchase,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::ListOwn => "list own inventory",
            Operation::UpdateQuantity => "update quantity",
            Operation::ListAvailable => "list available inventory",
            Operation::RecordPurchase => "record purchase",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while handling a request.
#[derive(Error, Debug)]
pub enum ServerError {
    /// The request body could not be decoded into its envelope.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    /// No account matched the supplied credentials.
    #[error("cannot find account with username: {0}")]
    AccountNotFound(String),

    /// The store did not answer the reachability check.
    #[error("store unreachable: {0}")]
    StoreUnreachable(#[source] StoreError),

    /// The credential lookup itself failed against a reachable store.
    #[error("credential check failed: {0}")]
    Verify(#[source] StoreError),

    /// The authenticated account does not hold the required role.
    #[error("account level is {actual}, {required} required")]
    Forbidden {
        /// The role the operation requires.
        required: Role,
        /// The raw level string the account carries.
        actual: String,
    },

    /// A listing matched zero rows.
    #[error("merchs empty")]
    EmptyResult,

    /// The ownership-scoped update changed zero rows.
    #[error("update quantity failed: zero rows affected")]
    NoRowsAffected,

    /// The purchase insert reported zero rows.
    #[error("new purchase failed: zero rows inserted")]
    InsertFailed,

    /// A store statement failed mid-operation.
    #[error("{operation} failed: {source}")]
    Store {
        /// The operation the statement belonged to.
        operation: Operation,
        /// The underlying store error.
        source: StoreError,
    },
}

impl ServerError {
    /// The HTTP status this failure answers with.
    ///
    /// Client-input and authorization failures are 406, everything else
    /// on the auth/domain path is 404 - the full per-request error
    /// surface of the wire contract.
    pub fn status(&self) -> u16 {
        match self {
            ServerError::Envelope(_) | ServerError::Forbidden { .. } => 406,
            ServerError::AccountNotFound(_)
            | ServerError::StoreUnreachable(_)
            | ServerError::Verify(_)
            | ServerError::EmptyResult
            | ServerError::NoRowsAffected
            | ServerError::InsertFailed
            | ServerError::Store { .. } => 404,
        }
    }

    /// The generic client-facing message, pinned to the wire contract.
    pub fn wire_message(&self) -> &'static str {
        match self {
            ServerError::Envelope(_) => "request body empty",
            ServerError::AccountNotFound(_)
            | ServerError::StoreUnreachable(_)
            | ServerError::Verify(_) => "account not authenticated",
            ServerError::Forbidden {
                required: Role::Seller,
                ..
            } => "account not seller",
            ServerError::Forbidden {
                required: Role::Buyer,
                ..
            } => "account not buyer",
            ServerError::EmptyResult => "cannot get merchs list",
            ServerError::NoRowsAffected => "merchs update failed",
            ServerError::InsertFailed => "merchs purchase failed",
            ServerError::Store { operation, .. } => match operation {
                Operation::ListOwn | Operation::ListAvailable => "cannot get merchs list",
                Operation::UpdateQuantity => "merchs update failed",
                Operation::RecordPurchase => "merchs purchase failed",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ServerError::Envelope(EnvelopeError::EmptyBody).status(), 406);
        assert_eq!(ServerError::AccountNotFound("alice".into()).status(), 404);
        assert_eq!(
            ServerError::Forbidden {
                required: Role::Seller,
                actual: "BUYER".into()
            }
            .status(),
            406
        );
        assert_eq!(ServerError::NoRowsAffected.status(), 404);
        assert_eq!(ServerError::InsertFailed.status(), 404);
    }

    #[test]
    fn wire_messages_are_generic() {
        // The username must never leak into the client-facing message.
        let err = ServerError::AccountNotFound("alice".into());
        assert_eq!(err.wire_message(), "account not authenticated");
        assert!(err.to_string().contains("alice"));
    }

    #[test]
    fn forbidden_message_names_required_role() {
        let err = ServerError::Forbidden {
            required: Role::Buyer,
            actual: "SELLER".into(),
        };
        assert_eq!(err.wire_message(), "account not buyer");
        assert_eq!(err.status(), 406);
    }

    #[test]
    fn store_failure_keeps_operation_message() {
        let err = ServerError::Store {
            operation: Operation::UpdateQuantity,
            source: StoreError::Unreachable("node down".into()),
        };
        assert_eq!(err.wire_message(), "merchs update failed");
        assert_eq!(err.status(), 404);
    }
}
