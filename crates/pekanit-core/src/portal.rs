// ── Portal facade ──
//
// Single entry point for front ends. Owns the API client and the injected
// session store, gates each workflow behind its own loading flag, and
// publishes queue-acquisition progress on a watch channel.

use std::sync::Arc;

use bytes::Bytes;
use pekanit_api::{ApiClient, Audience, ClassQueueEntry, GuestResponse, QueueNumber, StudentResponse};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::auth::{self, Route};
use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::gate::LoadingGate;
use crate::questionnaire::{self, GuestDraft, QueueOutcome, StudentDraft, StudentReceipt};
use crate::queue::{self, QueueState};
use crate::report;
use crate::session::Session;
use crate::store::{FileStore, SessionStore};

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<PortalInner>`; clones share the store, the
/// loading gates and the queue state.
#[derive(Clone)]
pub struct Portal {
    inner: Arc<PortalInner>,
}

struct PortalInner {
    api: ApiClient,
    store: Arc<dyn SessionStore>,
    queue_state: watch::Sender<QueueState>,
    login_gate: LoadingGate,
    queue_gate: LoadingGate,
    class_gate: LoadingGate,
    submit_gate: LoadingGate,
    report_gate: LoadingGate,
}

impl std::fmt::Debug for Portal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Portal")
            .field("base_url", &self.inner.api.base_url().as_str())
            .field("queue_state", &*self.inner.queue_state.borrow())
            .finish_non_exhaustive()
    }
}

impl Portal {
    /// Build a portal from configuration, with a [`FileStore`] at the
    /// configured session path.
    pub fn new(config: &ClientConfig) -> Result<Self, CoreError> {
        let store: Arc<dyn SessionStore> = Arc::new(FileStore::new(&config.session_path));
        Self::with_store(config, store)
    }

    /// Build a portal from configuration with a caller-supplied store.
    pub fn with_store(
        config: &ClientConfig,
        store: Arc<dyn SessionStore>,
    ) -> Result<Self, CoreError> {
        let api = ApiClient::new(config.api_url.clone(), &config.transport()).map_err(|e| {
            CoreError::Config {
                message: e.to_string(),
            }
        })?;
        debug!(api_url = %config.api_url, "portal configured");
        Ok(Self::with_api(api, store))
    }

    /// Wrap an existing API client.
    pub fn with_api(api: ApiClient, store: Arc<dyn SessionStore>) -> Self {
        let initial = match queue::cached(store.as_ref()) {
            Ok(Some(_)) => QueueState::Cached,
            _ => QueueState::Unissued,
        };
        let (queue_state, _) = watch::channel(initial);

        Self {
            inner: Arc::new(PortalInner {
                api,
                store,
                queue_state,
                login_gate: LoadingGate::new("login"),
                queue_gate: LoadingGate::new("queue number request"),
                class_gate: LoadingGate::new("class queue"),
                submit_gate: LoadingGate::new("questionnaire submission"),
                report_gate: LoadingGate::new("report"),
            }),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.inner.store
    }

    fn store_ref(&self) -> &dyn SessionStore {
        self.inner.store.as_ref()
    }

    /// Subscribe to queue-acquisition progress.
    pub fn queue_state(&self) -> watch::Receiver<QueueState> {
        self.inner.queue_state.subscribe()
    }

    /// Whether any workflow is in flight.
    pub fn is_loading(&self) -> bool {
        [
            &self.inner.login_gate,
            &self.inner.queue_gate,
            &self.inner.class_gate,
            &self.inner.submit_gate,
            &self.inner.report_gate,
        ]
        .iter()
        .any(|g| g.is_loading())
    }

    // ── Session ──────────────────────────────────────────────────

    /// The stored session, if logged in.
    pub fn session(&self) -> Result<Option<Session>, CoreError> {
        Ok(Session::load(self.store_ref())?)
    }

    fn require_session(&self) -> Result<Session, CoreError> {
        self.session()?.ok_or(CoreError::NotLoggedIn)
    }

    /// Landing route for the stored session.
    pub fn route(&self) -> Result<Route, CoreError> {
        Ok(Route::resolve(self.store_ref())?)
    }

    pub async fn login(&self, identifier: &str) -> Result<Session, CoreError> {
        let _guard = self.inner.login_gate.enter()?;
        let session = auth::login(&self.inner.api, self.store_ref(), identifier).await?;
        self.refresh_queue_state();
        Ok(session)
    }

    /// Forget the session, including any cached queue number.
    pub fn logout(&self) -> Result<(), CoreError> {
        Session::clear(self.store_ref())?;
        self.inner.queue_state.send_replace(QueueState::Unissued);
        info!("logged out");
        Ok(())
    }

    fn refresh_queue_state(&self) {
        let state = match queue::cached(self.store_ref()) {
            Ok(Some(_)) => QueueState::Cached,
            _ => QueueState::Unissued,
        };
        self.inner.queue_state.send_replace(state);
    }

    // ── Queue ────────────────────────────────────────────────────

    /// The cached queue number, without touching the network.
    pub fn cached_queue_number(&self) -> Result<Option<QueueNumber>, CoreError> {
        queue::cached(self.store_ref())
    }

    /// Return the cached queue number or obtain one from the backend.
    pub async fn ensure_queue_number(&self) -> Result<QueueNumber, CoreError> {
        let session = self.require_session()?;
        let _guard = self.inner.queue_gate.enter()?;
        queue::ensure_queue_number(
            &self.inner.api,
            self.store_ref(),
            &session,
            &self.inner.queue_state,
        )
        .await
    }

    /// Queue numbers for one class. Works without a session.
    pub async fn class_queue(&self, kelas: &str) -> Result<Vec<ClassQueueEntry>, CoreError> {
        let _guard = self.inner.class_gate.enter()?;
        queue::class_queue(&self.inner.api, kelas).await
    }

    // ── Questionnaires ───────────────────────────────────────────

    /// Submit a student questionnaire, then obtain a queue number.
    ///
    /// A rejected submission is an error and never reaches the queue step.
    /// Once the submission is accepted this returns `Ok`; a failure to get
    /// a queue number is reported in [`StudentReceipt::queue`].
    pub async fn submit_student(&self, draft: &StudentDraft) -> Result<StudentReceipt, CoreError> {
        let session = self.require_session()?;
        let _guard = self.inner.submit_gate.enter()?;

        questionnaire::submit_student(&self.inner.api, self.store_ref(), &session, draft).await?;

        let queue = match self.ensure_queue_number().await {
            Ok(number) => QueueOutcome::Issued(number),
            Err(e) => QueueOutcome::Failed(e),
        };
        Ok(StudentReceipt { queue })
    }

    pub async fn submit_guest(&self, draft: &GuestDraft) -> Result<(), CoreError> {
        let _guard = self.inner.submit_gate.enter()?;
        questionnaire::submit_guest(&self.inner.api, draft).await
    }

    // ── Reports ──────────────────────────────────────────────────

    pub async fn student_responses(&self) -> Result<Vec<StudentResponse>, CoreError> {
        let _guard = self.inner.report_gate.enter()?;
        report::student_responses(&self.inner.api).await
    }

    pub async fn guest_responses(&self) -> Result<Vec<GuestResponse>, CoreError> {
        let _guard = self.inner.report_gate.enter()?;
        report::guest_responses(&self.inner.api).await
    }

    /// Download the spreadsheet export for `audience`.
    pub async fn export(&self, audience: Audience) -> Result<Bytes, CoreError> {
        let _guard = self.inner.report_gate.enter()?;
        report::export(&self.inner.api, audience).await
    }
}
