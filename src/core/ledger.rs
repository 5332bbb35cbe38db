//! Session ledger of checked-out credentials.
//!
//! A credential is added when a login starts and removed on logout or when
//! the login rolls back. While present it cannot be used to log in again.
//! [`SessionLedger`] keeps the set in sessionStorage, so it survives reloads
//! and is cleared when the browsing session ends.

use tracing::warn;

use crate::config::LEDGER_KEY;
use crate::core::error::StorageError;
use crate::utils::storage;

/// Store of checked-out credentials.
pub trait CredentialStore {
    fn contains(&self, credential: &str) -> bool;

    fn add(&mut self, credential: &str) -> Result<(), StorageError>;

    fn remove(&mut self, credential: &str) -> Result<(), StorageError>;
}

// =============================================================================
// SessionLedger
// =============================================================================

/// Ledger persisted in sessionStorage as a JSON array under one key.
///
/// Every operation re-reads storage, so two controllers sharing the key see
/// each other's check-outs.
#[derive(Clone, Debug)]
pub struct SessionLedger {
    key: String,
}

impl SessionLedger {
    pub fn new() -> Self {
        Self::with_key(LEDGER_KEY)
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn load(&self) -> Vec<String> {
        storage::get::<Vec<String>>(&self.key).unwrap_or_default()
    }

    fn save(&self, credentials: &[String]) -> Result<(), StorageError> {
        storage::set(&self.key, &credentials)
    }
}

impl Default for SessionLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for SessionLedger {
    fn contains(&self, credential: &str) -> bool {
        self.load().iter().any(|c| c == credential)
    }

    fn add(&mut self, credential: &str) -> Result<(), StorageError> {
        let mut credentials = self.load();
        if !credentials.iter().any(|c| c == credential) {
            credentials.push(credential.to_string());
        }
        self.save(&credentials)
    }

    fn remove(&mut self, credential: &str) -> Result<(), StorageError> {
        let mut credentials = self.load();
        credentials.retain(|c| c != credential);
        self.save(&credentials)
    }
}

// =============================================================================
// Reservation
// =============================================================================

/// A checked-out credential that is released on drop unless committed.
///
/// Wraps the fetch step of a login, so every exit path other than
/// [`commit`](Self::commit) returns the credential to the ledger.
pub struct Reservation<'a, S: CredentialStore> {
    ledger: &'a mut S,
    credential: String,
    committed: bool,
}

impl<'a, S: CredentialStore> Reservation<'a, S> {
    /// Check the credential out of `ledger`.
    pub fn acquire(ledger: &'a mut S, credential: &str) -> Result<Self, StorageError> {
        ledger.add(credential)?;
        Ok(Self {
            ledger,
            credential: credential.to_string(),
            committed: false,
        })
    }

    /// Keep the credential checked out.
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl<S: CredentialStore> Drop for Reservation<'_, S> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if let Err(e) = self.ledger.remove(&self.credential) {
            warn!(error = %e, "failed to release credential during rollback");
        }
    }
}
