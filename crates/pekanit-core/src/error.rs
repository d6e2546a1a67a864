// ── Core error types ──
//
// One variant per workflow, each carrying a message fit to show a user:
// the backend's own `message` when it sent one, a fixed fallback otherwise.
// Consumers never see HTTP status codes or JSON parse failures directly.

use thiserror::Error;

/// Failure reading or writing the session store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("session store at {path} is corrupt: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Local input ─────────────────────────────────────────────────
    /// Bad local input. Never reaches the network.
    #[error("{message}")]
    Validation { field: String, message: String },

    // ── Workflow failures ───────────────────────────────────────────
    #[error("Login failed: {message}")]
    Auth {
        message: String,
        #[source]
        source: Option<pekanit_api::Error>,
    },

    #[error("Queue number unavailable: {message}")]
    Queue {
        message: String,
        #[source]
        source: Option<pekanit_api::Error>,
    },

    #[error("Questionnaire not sent: {message}")]
    Submit {
        message: String,
        #[source]
        source: Option<pekanit_api::Error>,
    },

    #[error("Report unavailable: {message}")]
    Report {
        message: String,
        #[source]
        source: Option<pekanit_api::Error>,
    },

    // ── Session / local state ───────────────────────────────────────
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("{workflow} is already in progress")]
    Busy { workflow: &'static str },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub(crate) fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The human-readable message without the workflow prefix.
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message, .. }
            | Self::Auth { message, .. }
            | Self::Queue { message, .. }
            | Self::Submit { message, .. }
            | Self::Report { message, .. }
            | Self::Config { message } => message.clone(),
            other => other.to_string(),
        }
    }

    /// The underlying API failure, if the workflow reached the network.
    pub fn api_error(&self) -> Option<&pekanit_api::Error> {
        match self {
            Self::Auth { source, .. }
            | Self::Queue { source, .. }
            | Self::Submit { source, .. }
            | Self::Report { source, .. } => source.as_ref(),
            _ => None,
        }
    }

    /// Returns `true` if the backend could not be reached at all.
    pub fn is_transport(&self) -> bool {
        self.api_error().is_some_and(pekanit_api::Error::is_transport)
    }

    /// Returns `true` if the transport timed out.
    pub fn is_timeout(&self) -> bool {
        self.api_error().is_some_and(pekanit_api::Error::is_timeout)
    }
}

/// Build a workflow error from an API failure, keeping it as the source.
macro_rules! from_api {
    ($variant:ident, $err:expr, $fallback:expr) => {{
        let err: pekanit_api::Error = $err;
        $crate::error::CoreError::$variant {
            message: $crate::error::api_message(&err, $fallback),
            source: Some(err),
        }
    }};
}
pub(crate) use from_api;

/// Pick the message to surface for an API failure.
///
/// Backend-supplied `message` wins. A bare HTTP error or an unreadable
/// body falls back to `fallback`; transport failures keep their own
/// description.
pub(crate) fn api_message(err: &pekanit_api::Error, fallback: &str) -> String {
    match err {
        pekanit_api::Error::Api {
            message: Some(message),
            ..
        } => message.clone(),
        pekanit_api::Error::Api { message: None, .. }
        | pekanit_api::Error::Deserialization { .. } => fallback.to_owned(),
        other => other.to_string(),
    }
}
