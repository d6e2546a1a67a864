use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::trace;

use crate::error::StoreError;

use super::{SessionKey, SessionStore};

/// Session store backed by a JSON object in a file.
///
/// Every read goes to disk, so separate processes pointing at the same
/// file share one session. Writes are read-modify-write of the whole
/// object; keys this client doesn't know are preserved. Concurrent
/// processes may still race on the same key.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => serde_json::from_str(&contents).map_err(|source| StoreError::Corrupt {
                path: self.path.display().to_string(),
                source,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(self.io_err(e)),
        }
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        let json = serde_json::to_string_pretty(values).map_err(|source| StoreError::Corrupt {
            path: self.path.display().to_string(),
            source,
        })?;
        std::fs::write(&self.path, json).map_err(|e| self.io_err(e))?;
        restrict_permissions(&self.path).map_err(|e| self.io_err(e))?;
        trace!(path = %self.path.display(), keys = values.len(), "session file written");
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut values = self.read_all()?;
        f(&mut values);
        self.write_all(&values)
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: SessionKey) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key.as_ref()))
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<(), StoreError> {
        self.update(|values| {
            values.insert(key.to_string(), value.to_owned());
        })
    }

    fn clear(&self, key: SessionKey) -> Result<(), StoreError> {
        self.update(|values| {
            values.remove(key.as_ref());
        })
    }
}

/// The file holds a bearer token: keep it owner-only where the platform allows.
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("session.json"));
        assert_eq!(store.get(SessionKey::UserToken).unwrap(), None);
    }

    #[test]
    fn values_survive_a_new_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let first = FileStore::new(&path);
        first.set(SessionKey::UserToken, "tok").unwrap();
        first.set(SessionKey::QueueNumber, "A12").unwrap();

        let second = FileStore::new(&path);
        assert_eq!(second.get(SessionKey::UserToken).unwrap().as_deref(), Some("tok"));
        assert_eq!(second.get(SessionKey::QueueNumber).unwrap().as_deref(), Some("A12"));

        second.clear(SessionKey::UserToken).unwrap();
        assert_eq!(first.get(SessionKey::UserToken).unwrap(), None);
    }

    #[test]
    fn unknown_keys_are_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

        let store = FileStore::new(&path);
        store.set(SessionKey::UserId, "7").unwrap();

        let raw: BTreeMap<String, String> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.get("theme").map(String::as_str), Some("dark"));
        assert_eq!(raw.get("userId").map(String::as_str), Some("7"));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileStore::new(&path).get(SessionKey::UserId).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }
}
