//! JSON values in sessionStorage.
//!
//! sessionStorage is scoped to the browser tab and cleared when the session
//! ends.

use serde::{Serialize, de::DeserializeOwned};

use super::dom;
use crate::core::error::StorageError;

/// Get a value from sessionStorage.
///
/// Returns `None` if the key doesn't exist or deserialization fails.
pub fn get<T: DeserializeOwned>(key: &str) -> Option<T> {
    let storage = dom::session_storage()?;
    let json = storage.get_item(key).ok()??;
    serde_json::from_str(&json).ok()
}

/// Store a value in sessionStorage.
pub fn set<T: Serialize>(key: &str, data: &T) -> Result<(), StorageError> {
    let storage = dom::session_storage().ok_or(StorageError::Unavailable)?;
    let json = serde_json::to_string(data).map_err(|_| StorageError::SerializationFailed)?;
    storage
        .set_item(key, &json)
        .map_err(|_| StorageError::WriteFailed)
}
