//! Access gate for the remote chapter bundle.
//!
//! A login checks the submitted credential against a static allow-list and
//! the session ledger, checks it out, then fetches the bundle manifest and
//! every file it lists. The check-out is rolled back when the bundle
//! cannot be loaded. Files the server answers with an error status are left
//! out; any other failure fails the whole bundle.
//!
//! ```text
//! LoggedOut --login--> Verifying --bundle ok--> LoggedIn --logout--> LoggedOut
//!                          \--bundle failure--> LoggedOut
//! ```

use futures::future::try_join_all;
use tracing::{debug, error, info, warn};

use crate::config::{BUNDLE_NAMESPACE, MANIFEST_FILE, bundle_base_url};
use crate::core::error::{AccessError, FetchError};
use crate::core::ledger::{CredentialStore, Reservation};
use crate::models::{AccessState, FileRecord, leaf_name, sort_by_path};
use crate::utils::fetch_content;

// =============================================================================
// Content Sources
// =============================================================================

/// Where bundle files are fetched from.
#[allow(async_fn_in_trait)]
pub trait ContentSource {
    /// Fetch one file, `path` relative to the bundle root.
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError>;
}

/// Bundle served over HTTP under a base URL.
#[derive(Clone, Debug)]
pub struct HttpContentSource {
    base_url: String,
}

impl HttpContentSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for HttpContentSource {
    fn default() -> Self {
        Self::new(bundle_base_url())
    }
}

impl ContentSource for HttpContentSource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        fetch_content(&self.url_for(path)).await
    }
}

// =============================================================================
// AccessController
// =============================================================================

/// Login state machine over a credential ledger and a content source.
#[derive(Clone, Debug)]
pub struct AccessController<S, C> {
    allow_list: Vec<String>,
    ledger: S,
    source: C,
    state: AccessState,
    active: Option<String>,
}

impl<S: CredentialStore, C: ContentSource> AccessController<S, C> {
    pub fn new(allow_list: Vec<String>, ledger: S, source: C) -> Self {
        Self {
            allow_list,
            ledger,
            source,
            state: AccessState::LoggedOut,
            active: None,
        }
    }

    pub fn state(&self) -> &AccessState {
        &self.state
    }

    /// Credential held by the current login, if any.
    pub fn active_credential(&self) -> Option<&str> {
        self.active.as_deref()
    }

    #[cfg(test)]
    pub fn ledger(&self) -> &S {
        &self.ledger
    }

    /// Allow-listed and not checked out right now.
    pub fn is_admissible(&self, credential: &str) -> bool {
        self.allow_list.iter().any(|c| c == credential) && !self.ledger.contains(credential)
    }

    /// Log in and fetch the bundle.
    ///
    /// On success the returned files are sorted by path and prefixed with
    /// the bundle namespace. On failure the ledger no longer holds
    /// `credential` and the controller is logged out.
    pub async fn login(&mut self, credential: &str) -> Result<Vec<FileRecord>, AccessError> {
        if !self.is_admissible(credential) {
            debug!("credential rejected");
            return Err(AccessError::InvalidCredential);
        }

        if self.active.is_some() {
            self.logout();
        }

        let reservation = Reservation::acquire(&mut self.ledger, credential)?;
        let verification = Verification::start(&mut self.state);

        match fetch_bundle(&self.source).await {
            Ok(files) => {
                reservation.commit();
                verification.finish(AccessState::LoggedIn);
                self.active = Some(credential.to_string());
                info!(files = files.len(), "bundle loaded");
                Ok(files)
            }
            Err(e) => {
                drop(reservation);
                drop(verification);
                error!(error = ?e, "error accessing bundle, login rolled back");
                Err(e)
            }
        }
    }

    /// Release the active credential and return to logged out.
    pub fn logout(&mut self) {
        if let Some(credential) = self.active.take()
            && let Err(e) = self.ledger.remove(&credential)
        {
            warn!(error = %e, "failed to release credential");
        }
        self.state = AccessState::LoggedOut;
    }
}

/// Holds a controller in Verifying. Dropped before [`finish`](Self::finish),
/// it returns the controller to LoggedOut.
struct Verification<'a> {
    state: &'a mut AccessState,
}

impl<'a> Verification<'a> {
    fn start(state: &'a mut AccessState) -> Self {
        *state = AccessState::Verifying;
        Self { state }
    }

    #[cfg(test)]
    fn state(&self) -> &AccessState {
        self.state
    }

    fn finish(self, outcome: AccessState) {
        *self.state = outcome;
    }
}

impl Drop for Verification<'_> {
    fn drop(&mut self) {
        if matches!(self.state, AccessState::Verifying) {
            *self.state = AccessState::LoggedOut;
        }
    }
}

/// Fetch the manifest, then every listed file concurrently.
async fn fetch_bundle<C: ContentSource>(source: &C) -> Result<Vec<FileRecord>, AccessError> {
    let listing = source
        .fetch_text(MANIFEST_FILE)
        .await
        .map_err(AccessError::ManifestFailure)?;
    let paths: Vec<String> = serde_json::from_str(&listing)
        .map_err(|e| AccessError::ManifestFailure(FetchError::JsonParseError(e.to_string())))?;
    debug!(entries = paths.len(), "manifest loaded");

    let fetches = paths.iter().map(|path| async move {
        match source.fetch_text(path).await {
            Ok(content) => Ok(Some(FileRecord::with_name(
                format!("{}/{}", BUNDLE_NAMESPACE, path),
                leaf_name(path),
                content,
            ))),
            Err(e @ FetchError::HttpError(_)) => {
                warn!(path = %path, error = %e, "bundle file unavailable, skipping");
                Ok(None)
            }
            Err(e) => Err(AccessError::FileFailure(e)),
        }
    });

    let mut files: Vec<FileRecord> = try_join_all(fetches).await?.into_iter().flatten().collect();
    sort_by_path(&mut files);
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;
    use crate::core::error::StorageError;
    use crate::core::ledger::fake::{FailingLedger, MemoryLedger};

    /// Serves files from a map; missing paths answer 404.
    #[derive(Default)]
    struct FakeSource {
        files: HashMap<String, String>,
        failing: HashMap<String, FetchError>,
        requested: RefCell<Vec<String>>,
    }

    impl FakeSource {
        fn with(mut self, path: &str, content: &str) -> Self {
            self.files.insert(path.to_string(), content.to_string());
            self
        }

        fn failing_with(mut self, path: &str, err: FetchError) -> Self {
            self.failing.insert(path.to_string(), err);
            self
        }

        fn bundle(paths: &[&str]) -> Self {
            let manifest = serde_json::to_string(paths).unwrap();
            let mut source = Self::default().with(MANIFEST_FILE, &manifest);
            for path in paths {
                source = source.with(path, &format!("Q: {path}?\nA: yes"));
            }
            source
        }
    }

    impl ContentSource for FakeSource {
        async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
            self.requested.borrow_mut().push(path.to_string());
            if let Some(err) = self.failing.get(path) {
                return Err(err.clone());
            }
            self.files
                .get(path)
                .cloned()
                .ok_or(FetchError::HttpError(404))
        }
    }

    /// Answers after yielding to the runtime a number of times.
    struct SlowSource {
        inner: FakeSource,
        delay: usize,
    }

    impl ContentSource for SlowSource {
        async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
            for _ in 0..self.delay {
                tokio::task::yield_now().await;
            }
            self.inner.fetch_text(path).await
        }
    }

    /// Never answers.
    struct StalledSource;

    impl ContentSource for StalledSource {
        async fn fetch_text(&self, _path: &str) -> Result<String, FetchError> {
            std::future::pending().await
        }
    }

    fn controller(source: FakeSource) -> AccessController<MemoryLedger, FakeSource> {
        AccessController::new(
            vec!["alpha".to_string(), "bravo".to_string()],
            MemoryLedger::new(),
            source,
        )
    }

    #[tokio::test]
    async fn test_login_success_prefixes_and_sorts() {
        let mut ctrl = controller(FakeSource::bundle(&["ch2/b.txt", "ch1/a.txt"]));
        let files = ctrl.login("alpha").await.unwrap();

        let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, ["PNotes/ch1/a.txt", "PNotes/ch2/b.txt"]);
        assert_eq!(files[0].name, "a.txt");
        assert_eq!(files[0].content, "Q: ch1/a.txt?\nA: yes");
        assert!(ctrl.state().is_logged_in());
        assert_eq!(ctrl.active_credential(), Some("alpha"));
        assert!(ctrl.ledger().contains("alpha"));
    }

    #[tokio::test]
    async fn test_unknown_credential_rejected_without_fetch() {
        let mut ctrl = controller(FakeSource::bundle(&["a.txt"]));
        let err = ctrl.login("mallory").await.unwrap_err();
        assert!(matches!(err, AccessError::InvalidCredential));
        assert!(ctrl.source.requested.borrow().is_empty());
        assert!(ctrl.ledger().is_empty());
        assert_eq!(ctrl.state(), &AccessState::LoggedOut);
    }

    #[tokio::test]
    async fn test_same_credential_twice_is_rejected() {
        let mut ctrl = controller(FakeSource::bundle(&["a.txt"]));
        ctrl.login("alpha").await.unwrap();
        let err = ctrl.login("alpha").await.unwrap_err();
        assert!(matches!(err, AccessError::InvalidCredential));
        // The first session is untouched
        assert!(ctrl.state().is_logged_in());
        assert!(ctrl.ledger().contains("alpha"));
    }

    #[tokio::test]
    async fn test_logout_allows_reuse() {
        let mut ctrl = controller(FakeSource::bundle(&["a.txt"]));
        ctrl.login("alpha").await.unwrap();
        ctrl.logout();
        assert!(!ctrl.ledger().contains("alpha"));
        assert_eq!(ctrl.state(), &AccessState::LoggedOut);
        assert!(ctrl.active_credential().is_none());

        assert!(ctrl.login("alpha").await.is_ok());
    }

    #[tokio::test]
    async fn test_manifest_failure_rolls_back() {
        let mut ctrl = controller(FakeSource::default());
        let err = ctrl.login("alpha").await.unwrap_err();
        assert!(matches!(
            err,
            AccessError::ManifestFailure(FetchError::HttpError(404))
        ));
        assert!(!ctrl.ledger().contains("alpha"));
        assert_eq!(ctrl.state(), &AccessState::LoggedOut);
        assert!(ctrl.active_credential().is_none());
    }

    #[tokio::test]
    async fn test_malformed_manifest_rolls_back() {
        let mut ctrl = controller(FakeSource::default().with(MANIFEST_FILE, "{not json"));
        let err = ctrl.login("bravo").await.unwrap_err();
        assert!(matches!(
            err,
            AccessError::ManifestFailure(FetchError::JsonParseError(_))
        ));
        assert!(ctrl.ledger().is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_skipped() {
        let source = FakeSource::default()
            .with(MANIFEST_FILE, r#"["ok.txt", "gone.txt"]"#)
            .with("ok.txt", "Q: a\nA: b");
        let mut ctrl = controller(source);

        let files = ctrl.login("alpha").await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "PNotes/ok.txt");
        assert!(ctrl.state().is_logged_in());
    }

    #[tokio::test]
    async fn test_network_failure_on_listed_file_rolls_back() {
        let source = FakeSource::bundle(&["ok.txt", "offline.txt"])
            .failing_with("offline.txt", FetchError::NetworkError("offline".into()));
        let mut ctrl = controller(source);

        let err = ctrl.login("alpha").await.unwrap_err();
        assert!(matches!(
            err,
            AccessError::FileFailure(FetchError::NetworkError(_))
        ));
        assert!(!ctrl.ledger().contains("alpha"));
        assert_eq!(ctrl.state(), &AccessState::LoggedOut);
        assert!(ctrl.active_credential().is_none());
    }

    #[tokio::test]
    async fn test_unreadable_file_body_rolls_back() {
        let source = FakeSource::bundle(&["a.txt"])
            .failing_with("a.txt", FetchError::ResponseReadFailed);
        let mut ctrl = controller(source);

        let err = ctrl.login("bravo").await.unwrap_err();
        assert!(matches!(err, AccessError::FileFailure(_)));
        assert!(ctrl.ledger().is_empty());
    }

    #[tokio::test]
    async fn test_slow_bundle_still_logs_in() {
        let source = SlowSource {
            inner: FakeSource::bundle(&["a.txt"]),
            delay: 64,
        };
        let mut ctrl =
            AccessController::new(vec!["alpha".to_string()], MemoryLedger::new(), source);

        let files = ctrl.login("alpha").await.unwrap();
        assert_eq!(files.len(), 1);
        assert!(ctrl.state().is_logged_in());
    }

    #[tokio::test]
    async fn test_pending_login_holds_credential_until_dropped() {
        let ledger = MemoryLedger::new();
        let mut ctrl =
            AccessController::new(vec!["alpha".to_string()], ledger.clone(), StalledSource);
        {
            let login = std::pin::pin!(ctrl.login("alpha"));
            assert!(futures::poll!(login).is_pending());
            assert!(ledger.contains("alpha"));
        }
        assert!(!ledger.contains("alpha"));
        assert_eq!(ctrl.state(), &AccessState::LoggedOut);
        assert!(ctrl.is_admissible("alpha"));
    }

    #[test]
    fn test_verification_holds_verifying_until_finished() {
        let mut state = AccessState::LoggedOut;
        {
            let verification = Verification::start(&mut state);
            assert_eq!(verification.state(), &AccessState::Verifying);
        }
        assert_eq!(state, AccessState::LoggedOut);

        Verification::start(&mut state).finish(AccessState::LoggedIn);
        assert!(state.is_logged_in());
    }

    #[tokio::test]
    async fn test_ledger_write_failure_leaves_logged_out() {
        let source = FakeSource::bundle(&["a.txt"]);
        let mut ctrl = AccessController::new(vec!["alpha".to_string()], FailingLedger, source);

        let err = ctrl.login("alpha").await.unwrap_err();
        assert!(matches!(err, AccessError::Ledger(StorageError::WriteFailed)));
        assert_eq!(ctrl.state(), &AccessState::LoggedOut);
        assert!(ctrl.active_credential().is_none());
        assert!(ctrl.source.requested.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_padded_credential_is_rejected() {
        let mut ctrl = controller(FakeSource::bundle(&["a.txt"]));
        let err = ctrl.login(" alpha").await.unwrap_err();
        assert!(matches!(err, AccessError::InvalidCredential));
        assert!(!ctrl.is_admissible("alpha "));
        assert!(ctrl.ledger().is_empty());
    }

    #[tokio::test]
    async fn test_switching_credentials_releases_previous() {
        let mut ctrl = controller(FakeSource::bundle(&["a.txt"]));
        ctrl.login("alpha").await.unwrap();
        ctrl.login("bravo").await.unwrap();
        assert!(!ctrl.ledger().contains("alpha"));
        assert!(ctrl.ledger().contains("bravo"));
        assert_eq!(ctrl.active_credential(), Some("bravo"));
    }

    #[test]
    fn test_http_source_urls() {
        let source = HttpContentSource::new("/PNotes/");
        assert_eq!(source.url_for("manifest.json"), "/PNotes/manifest.json");
        assert_eq!(source.url_for("/ch1/a.txt"), "/PNotes/ch1/a.txt");
    }
}
