//! Route Guard
//!
//! Synchronous access check for navigation. Only token presence is
//! consulted; an expired token is discovered by the next API call, which the
//! HTTP client turns into an eviction.

use super::Route;
use crate::session::CredentialStore;

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Render the requested destination
    Granted(Route),
    /// Render this destination instead
    Redirect(Route),
}

impl Access {
    /// The route that ends up on screen
    pub fn route(&self) -> &Route {
        match self {
            Access::Granted(route) | Access::Redirect(route) => route,
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted(_))
    }
}

/// Gates protected routes on the presence of a session token
#[derive(Debug, Clone)]
pub struct RouteGuard {
    store: CredentialStore,
}

impl RouteGuard {
    pub fn new(store: CredentialStore) -> Self {
        Self { store }
    }

    /// Decide whether `target` may be rendered
    pub fn check(&self, target: &Route) -> Access {
        if !target.is_protected() || self.store.is_present() {
            Access::Granted(target.clone())
        } else {
            tracing::debug!(target = %target, "No session, redirecting to login");
            Access::Redirect(Route::Login)
        }
    }

    /// Resolve a raw location path and check it
    pub fn resolve(&self, path: &str) -> Access {
        self.check(&Route::parse(path))
    }
}
