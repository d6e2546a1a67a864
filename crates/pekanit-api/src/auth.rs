// Login endpoint
//
// The backend authenticates a student by NIS alone and answers with a
// bearer token plus the student's profile. Whether a 2xx body counts as a
// successful login is the auth workflow's call, so the raw payload is
// returned as-is.

use tracing::debug;

use crate::client::{ApiClient, read_json};
use crate::error::Error;
use crate::models::{LoginRequest, LoginResponse};

impl ApiClient {
    /// `POST /api/login` with `{"nis": ...}`.
    ///
    /// Non-2xx responses become [`Error::Api`] carrying the body's
    /// `message`, if any.
    pub async fn login(&self, nis: &str) -> Result<LoginResponse, Error> {
        let url = self.endpoint(&["api", "login"])?;
        debug!("logging in at {}", url);

        let resp = self.post(url, &LoginRequest { nis }, None).await?;
        let body: LoginResponse = read_json(resp).await?;

        debug!(success = body.success, "login response received");
        Ok(body)
    }
}
