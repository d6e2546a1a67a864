//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a distinct exit code per failure class.

use miette::Diagnostic;
use thiserror::Error;

use pekanit_config::ConfigError;
use pekanit_core::{CoreError, StoreError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const QUEUE: i32 = 9;
    pub const SUBMIT: i32 = 10;
    pub const REPORT: i32 = 11;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the Pekan IT backend: {message}")]
    #[diagnostic(
        code(pekanit::connection_failed),
        help(
            "Check that the backend is up and the URL is right.\n\
             Set it with --api-url or `api_url` in your profile (pekanit config show).\n\
             For a self-signed certificate try --insecure."
        )
    )]
    ConnectionFailed { message: String },

    #[error("Request timed out: {message}")]
    #[diagnostic(
        code(pekanit::timeout),
        help("Increase the timeout with --timeout or check backend responsiveness.")
    )]
    Timeout { message: String },

    // ── Workflows ────────────────────────────────────────────────────
    #[error("Login failed: {message}")]
    #[diagnostic(code(pekanit::auth_failed), help("Check the NIS and try again."))]
    AuthFailed { message: String },

    #[error("Session rejected by the backend: {message}")]
    #[diagnostic(
        code(pekanit::session_expired),
        help("The stored token is no longer accepted. Run: pekanit logout && pekanit login")
    )]
    SessionExpired { message: String },

    #[error("Not logged in")]
    #[diagnostic(code(pekanit::not_logged_in), help("Run: pekanit login <NIS>"))]
    NotLoggedIn,

    #[error("Queue number unavailable: {message}")]
    #[diagnostic(
        code(pekanit::queue),
        help("Nothing was cached. Try again with: pekanit antrian get")
    )]
    Queue { message: String },

    #[error("Questionnaire not sent: {message}")]
    #[diagnostic(code(pekanit::submit))]
    Submit { message: String },

    #[error("Report unavailable: {message}")]
    #[diagnostic(code(pekanit::report))]
    Report { message: String },

    #[error("{workflow} is already in progress")]
    #[diagnostic(code(pekanit::busy))]
    Busy { workflow: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(pekanit::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(pekanit::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: pekanit config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No backend URL configured")]
    #[diagnostic(
        code(pekanit::no_config),
        help(
            "Create a profile with: pekanit config init\n\
             Or pass --api-url / set PEKANIT_API_URL.\n\
             Config file expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(pekanit::config))]
    Config(Box<figment::Error>),

    #[error("Session file problem: {0}")]
    #[diagnostic(
        code(pekanit::session_store),
        help("Remove the session file or point --session-file somewhere writable.")
    )]
    Store(#[from] StoreError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to serialize config: {0}")]
    #[diagnostic(code(pekanit::toml))]
    Toml(#[from] toml::ser::Error),

    #[error("failed to render JSON: {0}")]
    #[diagnostic(code(pekanit::json))]
    Json(#[from] serde_json::Error),

    #[error("failed to render YAML: {0}")]
    #[diagnostic(code(pekanit::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::SessionExpired { .. } | Self::NotLoggedIn => {
                exit_code::AUTH
            }
            Self::Queue { .. } => exit_code::QUEUE,
            Self::Submit { .. } => exit_code::SUBMIT,
            Self::Report { .. } => exit_code::REPORT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        if err.is_timeout() {
            return Self::Timeout {
                message: err.message(),
            };
        }
        if err.is_transport() {
            return Self::ConnectionFailed {
                message: err.message(),
            };
        }
        let unauthorized = err
            .api_error()
            .is_some_and(pekanit_core::ApiError::is_unauthorized);

        match err {
            CoreError::Validation { field, message } => Self::Validation {
                field,
                reason: message,
            },
            CoreError::Auth { message, .. } => Self::AuthFailed { message },
            CoreError::Queue { message, .. } | CoreError::Submit { message, .. }
                if unauthorized =>
            {
                Self::SessionExpired { message }
            }
            CoreError::Queue { message, .. } => Self::Queue { message },
            CoreError::Submit { message, .. } => Self::Submit { message },
            CoreError::Report { message, .. } => Self::Report { message },
            CoreError::NotLoggedIn => Self::NotLoggedIn,
            CoreError::Busy { workflow } => Self::Busy {
                workflow: workflow.into(),
            },
            CoreError::Store(e) => Self::Store(e),
            CoreError::Config { message } => Self::Validation {
                field: "api_url".into(),
                reason: message,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::UnknownProfile { name } => Self::ProfileNotFound {
                name,
                available: "(see pekanit config profiles)".into(),
            },
            ConfigError::Serialization(e) => Self::Toml(e),
            ConfigError::Figment(e) => Self::Config(e),
            ConfigError::Io(e) => Self::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_errors_have_distinct_exit_codes() {
        let queue: CliError = CoreError::Queue {
            message: "unrecognized response format".into(),
            source: None,
        }
        .into();
        assert_eq!(queue.exit_code(), exit_code::QUEUE);

        let validation: CliError = CoreError::Validation {
            field: "nis".into(),
            message: "NIS must not be empty".into(),
        }
        .into();
        assert_eq!(validation.exit_code(), exit_code::USAGE);

        assert_eq!(CliError::from(CoreError::NotLoggedIn).exit_code(), exit_code::AUTH);
    }

    #[test]
    fn unauthorized_queue_error_means_expired_session() {
        let err: CliError = CoreError::Queue {
            message: "Unauthenticated.".into(),
            source: Some(pekanit_core::ApiError::Api {
                status: 401,
                message: Some("Unauthenticated.".into()),
            }),
        }
        .into();
        assert!(matches!(err, CliError::SessionExpired { .. }));
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }
}
