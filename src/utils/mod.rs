//! Utility modules for browser and network operations.
//!
//! Provides:
//! - [`fetch_content`] - Network fetching with timeout
//! - [`files`] - `FileSystemEntry` / `File` bindings for the upload pipeline
//! - [`storage`] - JSON values in sessionStorage
//! - [`logging`] - `tracing` output to the browser console

pub mod dom;
pub mod files;
mod fetch;
pub mod logging;
pub mod storage;

pub use fetch::fetch_content;
