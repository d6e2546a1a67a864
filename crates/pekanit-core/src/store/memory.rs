use dashmap::DashMap;

use crate::error::StoreError;

use super::{SessionKey, SessionStore};

/// In-process session store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: DashMap<SessionKey, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: SessionKey) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(&key).map(|v| v.value().clone()))
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<(), StoreError> {
        self.values.insert(key, value.to_owned());
        Ok(())
    }

    fn clear(&self, key: SessionKey) -> Result<(), StoreError> {
        self.values.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_get_clear() {
        let store = MemoryStore::new();
        assert_eq!(store.get(SessionKey::UserId).unwrap(), None);

        store.set(SessionKey::UserId, "7").unwrap();
        assert_eq!(store.get(SessionKey::UserId).unwrap().as_deref(), Some("7"));

        store.clear(SessionKey::UserId).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn key_names_match_storage() {
        assert_eq!(SessionKey::UserToken.as_ref(), "userToken");
        assert_eq!(SessionKey::HasSubmitted.as_ref(), "is_ngisi");
        assert_eq!(SessionKey::QueueNumber.to_string(), "nomorAntrian");
    }
}
