//! Credential Store
//!
//! The single place the bearer token is persisted. Everything else asks the
//! store on demand and drops its copy once the request is built.

use std::sync::Arc;

use super::SessionToken;
use crate::storage::{KeyValueStorage, StorageResult};

/// Fixed storage key holding the bearer token
pub const TOKEN_KEY: &str = "authToken";

/// Persists one bearer token in durable key-value storage
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl CredentialStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Persist `token`, replacing any previous one
    pub fn save(&self, token: &SessionToken) -> StorageResult<()> {
        self.storage.set(TOKEN_KEY, token.as_str())
    }

    /// Current token, if any.
    ///
    /// An unreadable store is treated as "no session": the user is sent to
    /// login instead of being stuck behind a broken file.
    pub fn read(&self) -> Option<SessionToken> {
        match self.storage.get(TOKEN_KEY) {
            Ok(Some(value)) if !value.is_empty() => Some(SessionToken::new(value)),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Failed to read stored credential: {}", e);
                None
            }
        }
    }

    /// Remove the token. Clearing an empty store is a no-op.
    pub fn clear(&self) -> StorageResult<()> {
        self.storage.remove(TOKEN_KEY)
    }

    pub fn is_present(&self) -> bool {
        self.read().is_some()
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("present", &self.is_present())
            .finish()
    }
}
