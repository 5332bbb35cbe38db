//! Screen and session state types for the view layer.

/// Screen shown while no chapter set is loaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    /// Upload / drop zone (default)
    #[default]
    Upload,
    /// Card generator form
    Generate,
    /// Access code form for the gated bundle
    Login,
}

/// What the loading screen is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadingKind {
    /// Reading local files
    Upload,
    /// Fetching the gated bundle
    Bundle,
}

impl LoadingKind {
    /// Message displayed on the loading screen.
    pub fn message(self) -> &'static str {
        match self {
            LoadingKind::Upload => "Loading your study materials...",
            LoadingKind::Bundle => "Accessing PNotes...",
        }
    }
}

/// Access gate state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AccessState {
    #[default]
    LoggedOut,
    /// Credential checked out, bundle being fetched
    Verifying,
    LoggedIn,
}

impl AccessState {
    /// Check if a credential is currently in use.
    pub fn is_logged_in(&self) -> bool {
        matches!(self, AccessState::LoggedIn)
    }
}
