//! UI components built with Leptos.
//!
//! - [`upload`] - Landing screen with the folder picker and drop zone
//! - [`sidebar`] - Collapsible chapter tree
//! - [`viewer`] - Flip-card study view
//! - [`generator`] - Flashcard authoring form
//! - [`login`] - Password screen for the PNotes bundle
//! - [`icons`] - Centralized icon definitions (change theme here)

pub mod generator;
pub mod icons;
pub mod login;
pub mod sidebar;
pub mod upload;
pub mod viewer;

pub use generator::FlashcardGenerator;
pub use login::Login;
pub use sidebar::Sidebar;
pub use upload::FileUpload;
pub use viewer::FlashcardViewer;
