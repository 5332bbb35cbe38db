//! Root application module.
//!
//! Contains the main App component, the [`AppContext`] shared by every view,
//! and the wiring between the UI and the ingestion and access pipelines.

use leptos::prelude::*;
use leptos_icons::Icon;
use tracing::{error, info, warn};
use wasm_bindgen_futures::spawn_local;

use crate::components::icons as ic;
use crate::components::{FileUpload, FlashcardGenerator, FlashcardViewer, Login, Sidebar};
use crate::config::{BUNDLE_NAMESPACE, access_codes};
use crate::core::error::{AccessError, WalkError};
use crate::core::{AccessController, HttpContentSource, SessionLedger, build_tree, first_file, upload};
use crate::models::{FileRecord, LoadingKind, TreeNode, View};
use crate::utils::dom;
use crate::utils::files::{BrowserEntry, BrowserFile};

stylance::import_crate_style!(css, "src/app.module.css");

/// Shown when an upload cannot be read.
const UPLOAD_FAILED: &str = "We couldn't read those files. Please try again.";

/// Shown when an upload holds no plain-text files.
const UPLOAD_EMPTY: &str = "No plain-text files were found in that selection.";

type Gate = AccessController<SessionLedger, HttpContentSource>;

// ============================================================================
// AppContext
// ============================================================================

/// Global application context provided to all components.
///
/// All fields are signals or stored values, so the context is `Copy` and can
/// be moved into event handlers and async tasks freely.
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Loaded files, sorted by path.
    pub files: RwSignal<Vec<FileRecord>>,
    /// Directory tree derived from `files`.
    pub tree: Memo<Vec<TreeNode>>,
    /// File being studied.
    pub selected: RwSignal<Option<FileRecord>>,
    /// Screen shown while no files are loaded.
    pub view: RwSignal<View>,
    /// Set while an ingestion or bundle fetch is in flight.
    pub loading: RwSignal<Option<LoadingKind>>,
    pub sidebar_open: RwSignal<bool>,
    /// User-facing message for the current screen.
    pub notice: RwSignal<Option<String>>,
    /// Whether the loaded files came from the bundle.
    pub logged_in: RwSignal<bool>,
    access: StoredValue<Gate>,
}

impl AppContext {
    pub fn new() -> Self {
        let files = RwSignal::new(Vec::new());
        let gate = AccessController::new(
            access_codes(),
            SessionLedger::new(),
            HttpContentSource::default(),
        );

        Self {
            files,
            tree: Memo::new(move |_| files.with(|f| build_tree(f))),
            selected: RwSignal::new(None),
            view: RwSignal::new(View::default()),
            loading: RwSignal::new(None),
            sidebar_open: RwSignal::new(!dom::is_mobile()),
            notice: RwSignal::new(None),
            logged_in: RwSignal::new(false),
            access: StoredValue::new(gate),
        }
    }

    /// Switch screens, clearing any message from the previous one.
    pub fn go_to(&self, view: View) {
        self.notice.set(None);
        self.view.set(view);
    }

    /// Replace the loaded files. Selection resets and is re-derived from the
    /// new tree.
    pub fn load_files(&self, files: Vec<FileRecord>) {
        self.selected.set(None);
        self.files.set(files);
        self.go_to(View::Upload);
    }

    /// Study `file`. Re-selecting the current file keeps its session.
    pub fn select(&self, file: FileRecord) {
        if self.selected.with_untracked(|s| s.as_ref() == Some(&file)) {
            return;
        }
        self.selected.set(Some(file));
        if dom::is_mobile() {
            self.sidebar_open.set(false);
        }
    }

    /// Read files picked through the folder input.
    pub fn ingest_upload(self, files: Vec<BrowserFile>) {
        self.begin_upload();
        spawn_local(async move {
            let result = upload::ingest_files(files).await;
            self.finish_upload(result);
        });
    }

    /// Read a drop payload, falling back to its flat file list.
    pub fn ingest_drop(self, entries: Vec<BrowserEntry>, fallback: Vec<BrowserFile>) {
        self.begin_upload();
        spawn_local(async move {
            let result = upload::ingest_drop(entries, fallback).await;
            self.finish_upload(result);
        });
    }

    fn begin_upload(&self) {
        self.notice.set(None);
        self.loading.set(Some(LoadingKind::Upload));
    }

    fn finish_upload(&self, result: Result<Vec<FileRecord>, WalkError>) {
        match result {
            Ok(files) if files.is_empty() => {
                warn!("upload held no readable text files");
                self.notice.set(Some(UPLOAD_EMPTY.to_string()));
            }
            Ok(files) => {
                info!(count = files.len(), "files loaded");
                self.load_files(files);
            }
            Err(e) => {
                error!(error = %e, "error reading files");
                self.notice.set(Some(UPLOAD_FAILED.to_string()));
            }
        }
        self.loading.set(None);
    }

    /// Log in with `code` and load the bundle.
    ///
    /// The loading screen only appears once the code has passed the local
    /// checks. Errors are reported through `notice`.
    pub async fn login(self, code: String) {
        if !self.access.with_value(|gate| gate.is_admissible(&code)) {
            self.notice.set(Some(AccessError::InvalidCredential.to_string()));
            return;
        }

        self.notice.set(None);
        self.loading.set(Some(LoadingKind::Bundle));

        // The gate stays out of the store while the fetch is pending; the
        // loading screen blocks every other access path meanwhile.
        let mut gate = self.access.get_value();
        let outcome = gate.login(&code).await;
        self.logged_in.set(gate.state().is_logged_in());
        self.access.set_value(gate);

        match outcome {
            Ok(files) => self.load_files(files),
            Err(e) => self.notice.set(Some(e.to_string())),
        }
        self.loading.set(None);
    }

    /// Leave the study screen: log out if needed and forget the files.
    pub fn return_home(&self) {
        self.access.update_value(|gate| {
            if gate.active_credential().is_some() {
                gate.logout();
                info!("logged out");
            }
        });
        self.logged_in.set(false);
        self.selected.set(None);
        self.files.set(Vec::new());
        self.go_to(View::Upload);
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// App Component
// ============================================================================

/// Root application component.
///
/// Creates and provides [`AppContext`], keeps a file selected whenever files
/// are loaded, and picks the screen to show.
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    // Select the first file of the tree whenever nothing is selected.
    Effect::new(move |_| {
        if ctx.selected.with(Option::is_none)
            && let Some(file) = ctx.tree.with(|tree| first_file(tree).cloned())
        {
            ctx.selected.set(Some(file));
        }
    });

    let has_files = Memo::new(move |_| ctx.files.with(|f| !f.is_empty()));

    let screen = move || {
        if let Some(kind) = ctx.loading.get() {
            return view! {
                <div class=css::loading>
                    <div class=css::spinner></div>
                    <p>{kind.message()}</p>
                </div>
            }
            .into_any();
        }

        if has_files.get() {
            return view! { <StudyLayout /> }.into_any();
        }

        match ctx.view.get() {
            View::Upload => view! { <FileUpload /> }.into_any(),
            View::Generate => view! { <FlashcardGenerator /> }.into_any(),
            View::Login => view! { <Login /> }.into_any(),
        }
    };

    view! { <div class=css::app>{screen}</div> }
}

/// Sidebar plus the study area for the selected file.
#[component]
fn StudyLayout() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    let title = move || {
        if ctx.logged_in.get() {
            BUNDLE_NAMESPACE.to_string()
        } else {
            ctx.selected
                .with(|s| s.as_ref().map(|f| f.name.clone()))
                .unwrap_or_else(|| "Flashcards".to_string())
        }
    };
    let home_label = move || if ctx.logged_in.get() { "Logout" } else { "New Upload" };

    view! {
        <div class=css::layout>
            <Sidebar />
            <div class=css::main>
                <header class=css::header>
                    <button
                        class=css::menuButton
                        on:click=move |_| ctx.sidebar_open.update(|open| *open = !*open)
                        aria-label="Toggle chapters"
                    >
                        <Icon icon=ic::MENU />
                    </button>
                    <h1 class=css::title title=title>
                        {title}
                    </h1>
                    <button class=css::homeButton on:click=move |_| ctx.return_home()>
                        <Icon icon=ic::RETURN />
                        <span>{home_label}</span>
                    </button>
                </header>
                <main class=css::content>
                    {move || match ctx.selected.get() {
                        Some(file) => view! { <FlashcardViewer file=file /> }.into_any(),
                        None => {
                            view! {
                                <p class=css::placeholder>
                                    "Select a chapter from the menu to begin your study session."
                                </p>
                            }
                                .into_any()
                        }
                    }}
                </main>
            </div>
        </div>
    }
}
