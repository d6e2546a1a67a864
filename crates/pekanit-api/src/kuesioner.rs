// Questionnaire submission endpoints

use secrecy::SecretString;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{GuestQuestionnaire, StudentQuestionnaire};

impl ApiClient {
    /// `POST /api/kuesioner/create`, bearer-authorized.
    pub async fn submit_student_questionnaire(
        &self,
        token: &SecretString,
        body: &StudentQuestionnaire,
    ) -> Result<(), Error> {
        let url = self.endpoint(&["api", "kuesioner", "create"])?;
        let _resp = self.post(url, body, Some(token)).await?;
        debug!("student questionnaire accepted");
        Ok(())
    }

    /// `POST /api/tamu/send`. Guests submit anonymously.
    pub async fn submit_guest_questionnaire(&self, body: &GuestQuestionnaire) -> Result<(), Error> {
        let url = self.endpoint(&["api", "tamu", "send"])?;
        let _resp = self.post(url, body, None).await?;
        debug!("guest questionnaire accepted");
        Ok(())
    }
}
