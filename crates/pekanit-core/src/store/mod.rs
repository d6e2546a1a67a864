// ── Session store ──
//
// A plain key/value pass-through: no validation, no expiry. Every
// workflow reads and writes session state through this trait, never
// through an ambient global, so tests can swap in `MemoryStore`.

mod file;
mod memory;

use strum::{AsRefStr, Display, EnumIter};

use crate::error::StoreError;

pub use file::FileStore;
pub use memory::MemoryStore;

/// The closed set of keys the client persists.
///
/// String forms match the storage key names shared with other clients of
/// the same backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
pub enum SessionKey {
    #[strum(serialize = "userToken")]
    UserToken,
    #[strum(serialize = "userId")]
    UserId,
    #[strum(serialize = "userName")]
    UserName,
    #[strum(serialize = "userClass")]
    UserClass,
    /// "Has filled the questionnaire" flag, stored as `"true"` / `"false"`.
    #[strum(serialize = "is_ngisi")]
    HasSubmitted,
    /// Cached queue number.
    #[strum(serialize = "nomorAntrian")]
    QueueNumber,
}

/// Persistent key/value storage for session state.
///
/// Implementations are shared by reference across workflows and must be
/// safe to call from any task.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: SessionKey) -> Result<Option<String>, StoreError>;
    fn set(&self, key: SessionKey, value: &str) -> Result<(), StoreError>;
    fn clear(&self, key: SessionKey) -> Result<(), StoreError>;
}

impl<T: SessionStore + ?Sized> SessionStore for std::sync::Arc<T> {
    fn get(&self, key: SessionKey) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn clear(&self, key: SessionKey) -> Result<(), StoreError> {
        (**self).clear(key)
    }
}
