//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`FileRecord`], [`TreeNode`] - Loaded chapters and their navigation tree
//! - [`CardRecord`], [`CardDraft`] - Parsed flashcards and generator drafts
//! - [`View`], [`LoadingKind`], [`AccessState`] - Screen and session state

mod card;
mod file;
mod view;

pub use card::{CardDraft, CardRecord};
pub use file::{FileRecord, TreeNode, leaf_name, sort_by_path};
pub use view::{AccessState, LoadingKind, View};
