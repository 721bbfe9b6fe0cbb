//! Session store: the single persisted `UserSession` record.
//!
//! The record lives under [`SESSION_KEY`] as JSON. A record that fails to
//! parse is reported as absent; startup must never fail on bad stored data.

use thiserror::Error;

use crate::store::{KeyValueStore, StoreError};
use crate::types::UserSession;

/// Storage key holding the serialized session.
pub const SESSION_KEY: &str = "qa-assistant-user";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("session storage failed: {0}")]
    Store(#[from] StoreError),

    #[error("session serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Reads and writes the session record through an injected [`KeyValueStore`].
pub struct SessionStore<S> {
    backend: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Loads the stored session.
    ///
    /// Returns `Ok(None)` when nothing is stored or when the stored value is not
    /// a valid session record. Only backend read failures are errors.
    pub fn load(&self) -> Result<Option<UserSession>, SessionError> {
        let Some(raw) = self.backend.get(SESSION_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str::<UserSession>(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring malformed stored session");
                Ok(None)
            }
        }
    }

    /// Serializes `session` and writes it, replacing any previous record.
    pub fn save(&mut self, session: &UserSession) -> Result<(), SessionError> {
        let json = serde_json::to_string(session)?;
        self.backend.set(SESSION_KEY, &json)?;
        Ok(())
    }

    /// Deletes the stored record.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.backend.remove(SESSION_KEY)?;
        Ok(())
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Consumes the store and returns the backend, e.g. to simulate a restart.
    pub fn into_backend(self) -> S {
        self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::Role;

    #[test]
    fn load_returns_none_for_empty_store() {
        let store = SessionStore::new(MemoryStore::new());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn malformed_record_reads_as_absent() {
        for raw in ["{not json", "42", r#"{"email":"a@b.com"}"#, r#"{"id":"1","email":"x","role":"admin"}"#] {
            let store = SessionStore::new(MemoryStore::with_entry(SESSION_KEY, raw));
            assert_eq!(store.load().unwrap(), None, "raw = {raw}");
        }
    }

    #[test]
    fn save_then_load_and_clear() {
        let mut store = SessionStore::new(MemoryStore::new());
        let session = UserSession {
            id: "abc".to_owned(),
            email: "a@b.com".to_owned(),
            role: Some(Role::Tester),
        };
        store.save(&session).unwrap();
        assert_eq!(store.load().unwrap(), Some(session));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        assert!(store.backend().is_empty());
    }
}
