// Queue-number endpoints
//
// Issuance is idempotent per user on the backend: calling it twice for the
// same student hands back the same number. The "show" endpoint has shipped
// with several response shapes, so it is returned as raw JSON and the core
// crate decides how to read it.

use secrecy::SecretString;
use tracing::debug;

use crate::client::{ApiClient, read_json};
use crate::error::Error;
use crate::models::{ClassQueueEntry, ClassQueueEnvelope, IssueQueueRequest};

impl ApiClient {
    /// `POST /api/antrian` with `{"user_id": ...}`, bearer-authorized.
    ///
    /// The acknowledgement body is ignored; only the status matters.
    pub async fn issue_queue_number(
        &self,
        token: &SecretString,
        user_id: &str,
    ) -> Result<(), Error> {
        let url = self.endpoint(&["api", "antrian"])?;
        let _resp = self
            .post(url, &IssueQueueRequest { user_id }, Some(token))
            .await?;
        debug!(user_id, "queue number issued");
        Ok(())
    }

    /// `GET /api/antrian/show/:userId`, bearer-authorized. Returns the raw body.
    pub async fn show_queue_number(
        &self,
        token: &SecretString,
        user_id: &str,
    ) -> Result<serde_json::Value, Error> {
        let url = self.endpoint(&["api", "antrian", "show", user_id])?;
        let resp = self.get(url, Some(token)).await?;
        read_json(resp).await
    }

    /// `GET /api/antrian/kelas/:kelas`, unauthenticated.
    ///
    /// A missing or null `data` array is an empty class, not an error.
    pub async fn class_queue(&self, kelas: &str) -> Result<Vec<ClassQueueEntry>, Error> {
        let url = self.endpoint(&["api", "antrian", "kelas", kelas])?;
        let resp = self.get(url, None).await?;
        let envelope: ClassQueueEnvelope = read_json(resp).await?;
        Ok(envelope.data.unwrap_or_default())
    }
}
