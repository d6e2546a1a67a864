// ── Queue workflow ──
//
// Issue-then-show against the backend, normalize the response shape,
// cache the result. Once cached, a queue number is never re-validated.

use pekanit_api::{ApiClient, ClassQueueEntry, QueueNumber};
use serde_json::Value;
use strum::{AsRefStr, Display};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{CoreError, from_api};
use crate::session::Session;
use crate::store::{SessionKey, SessionStore};

const ISSUE_FALLBACK: &str = "Failed to create queue number";
const SHOW_FALLBACK: &str = "Failed to fetch queue number";
const CLASS_FALLBACK: &str = "Failed to fetch class queue";
const UNRECOGNIZED: &str = "unrecognized response format";

/// Class names offered by the per-class queue view.
pub const KNOWN_CLASSES: &[&str] = &[
    "X-RPL-1", "X-RPL-2", "XI-RPL-1", "XI-RPL-2", "XI-RPL-3", "XII-RPL-1", "XII-RPL-2",
    "XII-RPL-3", "X-TJKT-1", "X-TJKT-2", "X-TJKT-3", "XI-TKJ-1", "XI-TKJ-2", "XII-TKJ-1",
    "XII-TKJ-2", "X-DKV-1", "X-DKV-2", "X-DKV-3", "X-DKV-4", "XI-MM-1", "XI-MM-2", "XI-MM-3",
    "XI-MM-4", "XI-I-MM-1", "XII-MM-2", "XII-MM-3", "XII-MM-4", "X-LPB-1", "X-LPB-2",
    "XI-PKM-1", "XI-PKM-2", "XII-PKM-1", "XII-PKM-2",
];

// ── QueueState ───────────────────────────────────────────────────

/// Progress of queue-number acquisition, observable by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum QueueState {
    Unissued,
    Issuing,
    Issued,
    Cached,
}

// ── Extraction strategies ────────────────────────────────────────

type Strategy = fn(&Value) -> Option<QueueNumber>;

fn top_level_no_antrian(body: &Value) -> Option<QueueNumber> {
    body.get("no_antrian").and_then(QueueNumber::from_json)
}

fn nested_no_antrian(body: &Value) -> Option<QueueNumber> {
    body.get("data")
        .and_then(|data| data.get("no_antrian"))
        .and_then(QueueNumber::from_json)
}

fn top_level_queue_number(body: &Value) -> Option<QueueNumber> {
    body.get("queue_number").and_then(QueueNumber::from_json)
}

/// Tried in order; the first match wins.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("no_antrian", top_level_no_antrian),
    ("data.no_antrian", nested_no_antrian),
    ("queue_number", top_level_queue_number),
];

/// Read a queue number out of a "show" response body.
///
/// Accepts `{no_antrian}`, `{data: {no_antrian}}` and `{queue_number}`, in
/// that order of precedence. Values may be strings or numbers.
pub fn extract_queue_number(body: &Value) -> Option<QueueNumber> {
    STRATEGIES.iter().find_map(|(shape, strategy)| {
        let found = strategy(body)?;
        debug!(shape, "queue number extracted");
        Some(found)
    })
}

// ── Workflow ─────────────────────────────────────────────────────

/// The cached queue number, if any.
pub(crate) fn cached(store: &dyn SessionStore) -> Result<Option<QueueNumber>, CoreError> {
    Ok(store
        .get(SessionKey::QueueNumber)?
        .filter(|v| !v.is_empty())
        .map(QueueNumber::new))
}

/// Return the cached queue number, or issue and fetch one.
pub(crate) async fn ensure_queue_number(
    api: &ApiClient,
    store: &dyn SessionStore,
    session: &Session,
    state: &watch::Sender<QueueState>,
) -> Result<QueueNumber, CoreError> {
    if let Some(number) = cached(store)? {
        debug!(%number, "queue number served from cache");
        state.send_replace(QueueState::Cached);
        return Ok(number);
    }

    state.send_replace(QueueState::Issuing);
    match issue_and_fetch(api, session).await {
        Ok(number) => {
            state.send_replace(QueueState::Issued);
            if let Err(e) = store.set(SessionKey::QueueNumber, number.as_str()) {
                state.send_replace(QueueState::Unissued);
                warn!(user_id = %session.user_id, %number, error = %e, "queue number not cached");
                return Err(e.into());
            }
            state.send_replace(QueueState::Cached);
            info!(user_id = %session.user_id, %number, "queue number cached");
            Ok(number)
        }
        Err(e) => {
            state.send_replace(QueueState::Unissued);
            warn!(user_id = %session.user_id, error = %e, "queue number unavailable");
            Err(e)
        }
    }
}

async fn issue_and_fetch(api: &ApiClient, session: &Session) -> Result<QueueNumber, CoreError> {
    api.issue_queue_number(&session.token, &session.user_id)
        .await
        .map_err(|e| from_api!(Queue, e, ISSUE_FALLBACK))?;

    let body = api
        .show_queue_number(&session.token, &session.user_id)
        .await
        .map_err(|e| from_api!(Queue, e, SHOW_FALLBACK))?;

    extract_queue_number(&body).ok_or_else(|| {
        warn!(payload = %body, "queue response matched no known shape");
        CoreError::Queue {
            message: UNRECOGNIZED.into(),
            source: None,
        }
    })
}

/// List queue numbers for one class. No session needed.
pub(crate) async fn class_queue(
    api: &ApiClient,
    kelas: &str,
) -> Result<Vec<ClassQueueEntry>, CoreError> {
    let kelas = kelas.trim();
    if kelas.is_empty() {
        return Err(CoreError::validation("kelas", "Select a class first"));
    }

    let entries = api.class_queue(kelas).await.map_err(|e| {
        warn!(kelas, error = %e, "class queue unavailable");
        from_api!(Queue, e, CLASS_FALLBACK)
    })?;
    debug!(kelas, count = entries.len(), "class queue loaded");
    Ok(entries)
}
