// Reporting endpoints
//
// Response lists come back whole in a `{success, data: [...]}` envelope;
// there are no pagination parameters. Exports are spreadsheets passed
// through untouched.

use bytes::Bytes;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::{ApiClient, check_status, read_json};
use crate::error::Error;
use crate::models::{Audience, GuestResponse, StudentResponse};

#[derive(serde::Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: serde_json::Value,
}

impl ApiClient {
    /// `GET /api/show/siswa`.
    pub async fn list_student_responses(&self) -> Result<Vec<StudentResponse>, Error> {
        self.list(Audience::Siswa).await
    }

    /// `GET /api/show/tamu`.
    pub async fn list_guest_responses(&self) -> Result<Vec<GuestResponse>, Error> {
        self.list(Audience::Tamu).await
    }

    /// `GET /api/export-kuesioner` or `/api/export-kuesioner-tamu`.
    ///
    /// Returns the spreadsheet bytes exactly as served.
    pub async fn export(&self, audience: Audience) -> Result<Bytes, Error> {
        let url = self.endpoint(&audience.export_path())?;
        debug!("GET {}", url);

        let resp = self.http().get(url).header(ACCEPT, "*/*").send().await?;
        let resp = check_status(resp).await?;
        let bytes = resp.bytes().await?;

        debug!(%audience, len = bytes.len(), "export downloaded");
        Ok(bytes)
    }

    /// Fetch a response list and unwrap the envelope.
    ///
    /// `success` must be true and `data` must be an array; anything else is
    /// [`Error::UnexpectedPayload`].
    async fn list<T: DeserializeOwned>(&self, audience: Audience) -> Result<Vec<T>, Error> {
        let url = self.endpoint(&audience.list_path())?;
        let resp = self.get(url, None).await?;
        let envelope: ListEnvelope = read_json(resp).await?;

        if !envelope.success || !envelope.data.is_array() {
            return Err(Error::UnexpectedPayload {
                message: "invalid data format".into(),
            });
        }

        let rows: Vec<T> = serde_json::from_value(envelope.data).map_err(|e| {
            Error::Deserialization {
                message: e.to_string(),
                body: String::new(),
            }
        })?;

        debug!(%audience, count = rows.len(), "responses listed");
        Ok(rows)
    }
}
