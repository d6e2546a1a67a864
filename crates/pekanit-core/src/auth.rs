// ── Auth workflow ──
//
// NIS login and the landing route derived from the stored session.

use pekanit_api::{ApiClient, LoginResponse};
use secrecy::SecretString;
use strum::{AsRefStr, Display};
use tracing::{debug, info, warn};

use crate::error::{CoreError, StoreError, from_api};
use crate::session::{self, Session};
use crate::store::{SessionKey, SessionStore};

const LOGIN_FALLBACK: &str = "Login failed";

/// Where a front end should send the user on startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Route {
    /// No session: ask for a NIS.
    Login,
    /// Logged in, questionnaire not filled yet.
    Questionnaire,
    /// Logged in and questionnaire done: show the queue number.
    Queue,
}

impl Route {
    /// Derive the landing route from the stored token and completion flag.
    pub fn resolve(store: &dyn SessionStore) -> Result<Self, StoreError> {
        let has_token = store
            .get(SessionKey::UserToken)?
            .is_some_and(|t| !t.is_empty());
        if !has_token {
            return Ok(Self::Login);
        }
        if session::read_flag(store)? {
            Ok(Self::Queue)
        } else {
            Ok(Self::Questionnaire)
        }
    }
}

/// Trim and validate a NIS. Empty input never reaches the network.
pub(crate) fn normalize_identifier(identifier: &str) -> Result<&str, CoreError> {
    let nis = identifier.trim();
    if nis.is_empty() {
        return Err(CoreError::validation("nis", "NIS must not be empty"));
    }
    Ok(nis)
}

/// Log in with a NIS and persist the resulting session.
///
/// On success the four profile fields are written to `store`, the
/// completion flag is reset to `false` and any queue number cached for a
/// previous login is dropped.
pub(crate) async fn login(
    api: &ApiClient,
    store: &dyn SessionStore,
    identifier: &str,
) -> Result<Session, CoreError> {
    let nis = normalize_identifier(identifier)?;

    let response = api.login(nis).await.map_err(|e| {
        warn!(error = %e, "login request failed");
        let fallback = e
            .status()
            .map_or_else(|| LOGIN_FALLBACK.to_owned(), |s| format!("HTTP error! status: {s}"));
        from_api!(Auth, e, &fallback)
    })?;

    let session = session_from_response(response)?;
    store.clear(SessionKey::QueueNumber)?;
    session.persist(store)?;

    info!(user_id = %session.user_id, kelas = %session.user_class, "logged in");
    Ok(session)
}

fn session_from_response(response: LoginResponse) -> Result<Session, CoreError> {
    let LoginResponse {
        success,
        token,
        message,
        data,
    } = response;

    match (success, token.filter(|t| !t.is_empty()), data) {
        (true, Some(token), Some(user)) => Ok(Session {
            token: SecretString::from(token),
            user_id: user.user_id,
            user_name: user.name,
            user_class: user.kelas,
            has_submitted_questionnaire: false,
        }),
        (success, ..) => {
            debug!(success, "login rejected by backend");
            Err(CoreError::Auth {
                message: message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| LOGIN_FALLBACK.to_owned()),
                source: None,
            })
        }
    }
}
