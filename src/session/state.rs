//! Session lifecycle
//!
//! Two states, three writers. Login success moves to `Authenticated`; logout
//! and an authorization failure both clear the token and move to
//! `Unauthenticated`, forcing navigation to the login page.

use std::sync::Arc;
use tokio::sync::watch;

use super::{CredentialStore, SessionToken};
use crate::navigation::{Navigator, Route};
use crate::storage::StorageResult;

/// Whether a session token is held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

/// Owns the credential store and the auth state machine
#[derive(Clone)]
pub struct Session {
    store: CredentialStore,
    navigator: Navigator,
    state: Arc<watch::Sender<AuthState>>,
}

impl Session {
    /// Start from whatever the store currently holds
    pub fn new(store: CredentialStore, navigator: Navigator) -> Self {
        let initial = if store.is_present() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        };
        let (tx, _rx) = watch::channel(initial);

        Self {
            store,
            navigator,
            state: Arc::new(tx),
        }
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn state(&self) -> AuthState {
        *self.state.borrow()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == AuthState::Authenticated
    }

    /// Watch for state transitions
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Record a successful login and go to the dashboard
    pub fn sign_in(&self, token: SessionToken) -> StorageResult<()> {
        self.store.save(&token)?;
        self.state.send_replace(AuthState::Authenticated);
        tracing::info!("Signed in");
        self.navigator.navigate(Route::Dashboard);
        Ok(())
    }

    /// Explicit logout
    pub fn sign_out(&self) -> StorageResult<()> {
        self.store.clear()?;
        self.state.send_replace(AuthState::Unauthenticated);
        tracing::info!("Signed out");
        self.navigator.navigate(Route::Login);
        Ok(())
    }

    /// React to an authorization failure from the server.
    ///
    /// The token is always cleared. The transition to `Unauthenticated` and
    /// the forced navigation happen only once, however many in-flight
    /// requests fail; returns whether this call performed the transition.
    pub fn expire(&self) -> bool {
        if let Err(e) = self.store.clear() {
            tracing::error!("Failed to clear credential after authorization failure: {}", e);
        }

        let transitioned = self.state.send_if_modified(|state| {
            if *state == AuthState::Authenticated {
                *state = AuthState::Unauthenticated;
                true
            } else {
                false
            }
        });

        if transitioned {
            tracing::warn!("Session rejected by server, returning to login");
            self.navigator.navigate(Route::Login);
        }

        transitioned
    }
}
