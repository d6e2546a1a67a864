// ── Session ──
//
// The logged-in student as persisted in the session store. The backend
// is the source of truth for id, name and class; the completion flag is
// cached client-side.

use secrecy::SecretString;
use strum::IntoEnumIterator;

use crate::error::StoreError;
use crate::store::{SessionKey, SessionStore};

/// A logged-in student.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: SecretString,
    pub user_id: String,
    pub user_name: String,
    pub user_class: String,
    pub has_submitted_questionnaire: bool,
}

impl Session {
    /// Rebuild the session from the store.
    ///
    /// Returns `None` unless both a token and a user id are present; name
    /// and class default to empty when missing.
    pub fn load(store: &dyn SessionStore) -> Result<Option<Self>, StoreError> {
        let Some(token) = store.get(SessionKey::UserToken)?.filter(|t| !t.is_empty()) else {
            return Ok(None);
        };
        let Some(user_id) = store.get(SessionKey::UserId)?.filter(|id| !id.is_empty()) else {
            return Ok(None);
        };

        Ok(Some(Self {
            token: SecretString::from(token),
            user_id,
            user_name: store.get(SessionKey::UserName)?.unwrap_or_default(),
            user_class: store.get(SessionKey::UserClass)?.unwrap_or_default(),
            has_submitted_questionnaire: read_flag(store)?,
        }))
    }

    /// Write all five session fields.
    pub(crate) fn persist(&self, store: &dyn SessionStore) -> Result<(), StoreError> {
        use secrecy::ExposeSecret;

        store.set(SessionKey::UserToken, self.token.expose_secret())?;
        store.set(SessionKey::UserId, &self.user_id)?;
        store.set(SessionKey::UserName, &self.user_name)?;
        store.set(SessionKey::UserClass, &self.user_class)?;
        write_flag(store, self.has_submitted_questionnaire)
    }

    /// Remove every session key, including the cached queue number.
    pub fn clear(store: &dyn SessionStore) -> Result<(), StoreError> {
        for key in SessionKey::iter() {
            store.clear(key)?;
        }
        Ok(())
    }
}

pub(crate) fn read_flag(store: &dyn SessionStore) -> Result<bool, StoreError> {
    Ok(store
        .get(SessionKey::HasSubmitted)?
        .is_some_and(|v| v.eq_ignore_ascii_case("true")))
}

pub(crate) fn write_flag(store: &dyn SessionStore, value: bool) -> Result<(), StoreError> {
    store.set(SessionKey::HasSubmitted, if value { "true" } else { "false" })
}
