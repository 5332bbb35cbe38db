//! Custom error types for the application.
//!
//! Provides structured error handling with meaningful error messages
//! and proper error categorization for each domain:
//!
//! - [`WalkError`] - Reading dropped or uploaded files and directories
//! - [`FetchError`] - Network/fetch-related errors for HTTP requests
//! - [`StorageError`] - sessionStorage operations for the credential ledger
//! - [`AccessError`] - Access gate failures

use thiserror::Error;

/// Failure while ingesting local files. Aborts the whole batch.
#[derive(Debug, Clone, Error)]
pub enum WalkError {
    /// A file's content could not be read
    #[error("failed to read '{path}': {reason}")]
    ReadFailed { path: String, reason: String },
    /// A directory could not be enumerated
    #[error("failed to list directory '{path}': {reason}")]
    EnumerationFailed { path: String, reason: String },
}

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (CORS, offline, etc.)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// HTTP error response (non-2xx status)
    #[error("HTTP error: {0}")]
    HttpError(u16),
    /// Failed to read response body
    #[error("Failed to read response")]
    ResponseReadFailed,
    /// Invalid response content (not text)
    #[error("Invalid response content")]
    InvalidContent,
    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParseError(String),
}

/// sessionStorage errors.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// sessionStorage not available.
    #[error("sessionStorage not available")]
    Unavailable,
    /// Failed to serialize data to JSON.
    #[error("failed to serialize ledger")]
    SerializationFailed,
    /// Failed to write to storage.
    #[error("failed to write to sessionStorage")]
    WriteFailed,
}

/// Access gate errors.
///
/// Display strings are shown to the user as-is, so they stay generic.
#[derive(Debug, Clone, Error)]
pub enum AccessError {
    /// Not allow-listed, or already checked out in this session.
    #[error("Invalid or already used password.")]
    InvalidCredential,
    /// The bundle manifest could not be fetched or decoded.
    #[error("The requested content is unavailable right now.")]
    ManifestFailure(#[source] FetchError),
    /// A listed file failed for a reason other than an error status.
    #[error("The requested content is unavailable right now.")]
    FileFailure(#[source] FetchError),
    /// The credential ledger could not be updated.
    #[error("The requested content is unavailable right now.")]
    Ledger(#[from] StorageError),
}
