// ── Runtime client configuration ──
//
// Describes *how* to reach the backend and where session state lives.
// Never touches disk itself; the CLI (via pekanit-config) builds a
// `ClientConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use pekanit_api::{TlsMode, TransportConfig};
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (staging servers with self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for talking to one Pekan IT backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g. `https://be-kuesioner.example.id`).
    pub api_url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout applied by the transport.
    pub timeout: Duration,
    /// JSON file backing the session store.
    pub session_path: PathBuf,
}

impl ClientConfig {
    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
