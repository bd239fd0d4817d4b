//! Credential verification and role authorization.
//!
//! Authentication is credential-per-call: the caller's raw password is
//! digested with SHA-256 and the digest is matched against the stored one
//! inside a single parameterized lookup. The plaintext never reaches the
//! store and is never logged.
//!
//! Note: the digest is unsalted SHA-256 of the raw password. That is a
//! known weakness of the stored credential format, kept for compatibility
//! with the existing `users` table; changing it means migrating every
//! stored digest.

use crate::error::{ServerError, ServerResult};
use merchd_store::{Account, Role, Store};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Digests a raw password to the lowercase hex SHA-256 form the store
/// holds.
pub fn sha256_hex(raw: &str) -> String {
    let digest = Sha256::digest(raw.as_bytes());
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

/// Verifies a credential pair against the store.
///
/// Pings the store first, then looks up the single account matching both
/// the username and the password digest.
///
/// # Errors
///
/// - [`ServerError::StoreUnreachable`] if the reachability check fails
/// - [`ServerError::Verify`] if the lookup itself fails
/// - [`ServerError::AccountNotFound`] if zero rows match
pub fn verify(store: &dyn Store, username: &str, password_hash: &str) -> ServerResult<Account> {
    store.ping().map_err(ServerError::StoreUnreachable)?;
    debug!(username, "checking account");
    match store.find_account(username, password_hash) {
        Ok(Some(account)) => Ok(account),
        Ok(None) => Err(ServerError::AccountNotFound(username.to_string())),
        Err(source) => Err(ServerError::Verify(source)),
    }
}

/// Confirms the account holds exactly the required role.
///
/// Pure comparison, no I/O. Unknown level strings parse to no role at
/// all and therefore fail closed.
pub fn require_role(account: &Account, required: Role) -> ServerResult<()> {
    if account.role() == Some(required) {
        Ok(())
    } else {
        Err(ServerError::Forbidden {
            required,
            actual: account.level.clone(),
        })
    }
}
