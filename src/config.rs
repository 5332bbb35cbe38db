//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.
//! Text assets are loaded at compile time using `include_str!`.

use tracing::Level;

// =============================================================================
// Text Assets (loaded at compile time)
// =============================================================================

/// Access codes for the gated bundle, one per line.
const ACCESS_CODES_TEXT: &str = include_str!("../assets/text/access_codes.txt");

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name shown on the landing screen.
pub const APP_NAME: &str = "FlashGen";

/// Tagline displayed under the application name.
pub const APP_TAGLINE: &str = "Turn your chapter notes into flip-able flashcards.";

// =============================================================================
// Logging
// =============================================================================

/// Maximum level forwarded to the browser console.
pub const LOG_LEVEL: Level = if cfg!(debug_assertions) {
    Level::DEBUG
} else {
    Level::INFO
};

// =============================================================================
// Upload Configuration
// =============================================================================

/// MIME types accepted at the upload boundary. An empty type is accepted too,
/// browsers report it for files without a known extension.
pub const ACCEPTED_MIME_TYPES: &[&str] = &["text/plain"];

/// File name offered by the card generator.
pub const DEFAULT_DECK_FILENAME: &str = "flashcards.txt";

/// Extension appended to generated decks.
pub const DECK_EXTENSION: &str = ".txt";

// =============================================================================
// Access Configuration
// =============================================================================

/// sessionStorage key holding the checked-out credentials (JSON array).
pub const LEDGER_KEY: &str = "flashgen_used_passwords";

/// Path segment prefixed to every file of the gated bundle.
pub const BUNDLE_NAMESPACE: &str = "PNotes";

/// Manifest file name, relative to the bundle base URL.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Base URL of the gated bundle (served next to the app).
pub fn bundle_base_url() -> String {
    format!("/{}", BUNDLE_NAMESPACE)
}

/// Credentials accepted by the access gate.
pub fn access_codes() -> Vec<String> {
    ACCESS_CODES_TEXT
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

// =============================================================================
// UI Configuration
// =============================================================================

/// Viewport width (px) below which the sidebar closes after a selection.
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;
