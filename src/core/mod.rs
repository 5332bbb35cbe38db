//! Core logic of the flashcard application.
//!
//! This module provides:
//! - [`walker`] and [`upload`] - ingestion of dropped and picked files
//! - [`build_tree`] - navigation tree from flat file paths
//! - [`parse_cards`] - the `Q:`/`A:` chapter format, and its generator
//! - [`Navigator`] - shuffled, circular study sessions
//! - [`AccessController`] - credential gate for the remote bundle

pub mod access;
pub mod cards;
pub mod error;
pub mod ledger;
mod navigator;
mod tree;
pub mod upload;
pub mod walker;

pub use access::{AccessController, HttpContentSource};
pub use cards::{can_generate, normalize_filename, parse_cards, render_cards};
pub use ledger::SessionLedger;
pub use navigator::Navigator;
pub use tree::{build_tree, first_file, flatten_files};
