// Pekan IT backend HTTP client
//
// Wraps `reqwest::Client` with base-URL path construction, bearer auth,
// and error-body extraction. Endpoint groups (auth, antrian, kuesioner,
// report) are implemented as inherent methods in sibling modules so this
// one stays focused on transport mechanics.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Error body shape shared by every endpoint: `{"message": "..."}`.
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Raw HTTP client for the Pekan IT backend.
///
/// Holds no session state: bearer tokens are passed per call by the
/// workflows that own them.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client from a base URL and transport config.
    ///
    /// The base URL may carry a path prefix (`https://host/backend`); all
    /// endpoint paths are appended below it.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, base_url)
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Result<Self, Error> {
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::InvalidBaseUrl {
                url: base_url.to_string(),
            });
        }
        Ok(Self { http, base_url })
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build `{base}/{segments...}`, percent-encoding each segment.
    ///
    /// Path parameters such as a class name (`XI-RPL-1`) or a user id go
    /// through here so they can never inject extra path components.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl {
                url: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request, optionally bearer-authorized.
    pub(crate) async fn get(
        &self,
        url: Url,
        token: Option<&SecretString>,
    ) -> Result<reqwest::Response, Error> {
        debug!("GET {}", url);

        let builder = authorize(self.http.get(url), token);
        let resp = builder.send().await?;
        check_status(resp).await
    }

    /// Send a POST request with a JSON body, optionally bearer-authorized.
    pub(crate) async fn post(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
        token: Option<&SecretString>,
    ) -> Result<reqwest::Response, Error> {
        debug!("POST {}", url);

        let builder = authorize(self.http.post(url).json(body), token);
        let resp = builder.send().await?;
        check_status(resp).await
    }
}

fn authorize(
    builder: reqwest::RequestBuilder,
    token: Option<&SecretString>,
) -> reqwest::RequestBuilder {
    match token {
        Some(token) => builder.bearer_auth(token.expose_secret()),
        None => builder,
    }
}

/// Pass 2xx responses through; turn anything else into `Error::Api`,
/// lifting the body's `message` field when it has one.
pub(crate) async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    trace!(%status, body = %body, "non-success response");

    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty());

    Err(Error::Api {
        status: status.as_u16(),
        message,
    })
}

/// Read the body as text and deserialize it, keeping the raw body on failure.
pub(crate) async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        trace!(error = %e, body = %body, "response body did not deserialize");
        Error::Deserialization {
            message: e.to_string(),
            body: body.clone(),
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap()).unwrap()
    }

    #[test]
    fn endpoint_appends_below_root() {
        let url = client("https://be.example.id").endpoint(&["api", "login"]).unwrap();
        assert_eq!(url.as_str(), "https://be.example.id/api/login");
    }

    #[test]
    fn endpoint_keeps_path_prefix() {
        let url = client("https://example.id/backend/")
            .endpoint(&["api", "show", "siswa"])
            .unwrap();
        assert_eq!(url.as_str(), "https://example.id/backend/api/show/siswa");
    }

    #[test]
    fn endpoint_encodes_segments() {
        let url = client("https://be.example.id")
            .endpoint(&["api", "antrian", "kelas", "XI RPL/1"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://be.example.id/api/antrian/kelas/XI%20RPL%2F1"
        );
    }

    #[test]
    fn rejects_non_http_base() {
        let err = ApiClient::with_client(
            reqwest::Client::new(),
            Url::parse("mailto:panitia@example.id").unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidBaseUrl { .. }));
    }
}
