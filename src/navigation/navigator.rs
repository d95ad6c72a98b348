//! Navigator
//!
//! Holds the current destination. The shell renders whatever it points at;
//! the session forces it to the login page when credentials go away.

use std::sync::Arc;
use tokio::sync::watch;

use super::Route;

/// Shared handle to the current location
#[derive(Clone)]
pub struct Navigator {
    current: Arc<watch::Sender<Route>>,
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            current: Arc::new(tx),
        }
    }

    /// Move to `route`
    pub fn navigate(&self, route: Route) {
        tracing::debug!(to = %route, "Navigating");
        self.current.send_replace(route);
    }

    /// Current location
    pub fn current(&self) -> Route {
        self.current.borrow().clone()
    }

    /// Watch for location changes
    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.current.subscribe()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Dashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_updates_current() {
        let navigator = Navigator::default();
        assert_eq!(navigator.current(), Route::Dashboard);

        navigator.navigate(Route::Reviews);
        assert_eq!(navigator.current(), Route::Reviews);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let navigator = Navigator::new(Route::Reviews);
        let mut rx = navigator.subscribe();

        let clone = navigator.clone();
        clone.navigate(Route::Login);

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Route::Login);
    }
}
