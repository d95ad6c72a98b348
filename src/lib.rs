//! # Site Admin
//!
//! Administration console for a game landing page. Signs an administrator in
//! against the landing page's REST backend and manages the content it
//! serves: background carousel images, app store links, social links, navbar
//! download buttons and player reviews.
//!
//! ## Modules
//!
//! - [`session`]: Bearer token persistence and the authentication state machine
//! - [`navigation`]: Console routes, the current location and the route guard
//! - [`client`]: HTTP client that authorizes requests and evicts rejected sessions
//! - [`resources`]: Typed collections and the list/create/update/delete controller
//! - [`auth`]: Login, registration, password reset and profile
//! - [`dashboard`]: Content counts with periodic refresh
//! - [`storage`]: Durable key-value store for the token and theme
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use site_admin::config::Config;
//! use site_admin::navigation::Navigator;
//! use site_admin::resources::ReviewController;
//! use site_admin::session::{CredentialStore, Session};
//! use site_admin::storage::FileStorage;
//! use site_admin::{ApiClient, AuthService};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let storage = Arc::new(FileStorage::open(config.storage.storage_file())?);
//!     let session = Session::new(CredentialStore::new(storage), Navigator::default());
//!     let client = ApiClient::new(&config.api, session)?;
//!
//!     AuthService::new(client.clone())
//!         .login("admin@example.com", "secret1")
//!         .await?;
//!
//!     let mut reviews = ReviewController::new(client);
//!     for review in reviews.list().await? {
//!         println!("{} ({}/5): {}", review.name, review.rating, review.comment);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod navigation;
pub mod resources;
pub mod session;
pub mod shell;
pub mod storage;
pub mod theme;
pub mod validation;

#[cfg(test)]
mod testing;

// Re-export top-level types for convenience
pub use auth::{AuthService, Profile, Registration};
pub use client::ApiClient;
pub use config::Config;
pub use dashboard::{Dashboard, DashboardStats, RefreshTask};
pub use error::{ApiError, ApiResult};
pub use navigation::{Access, Navigator, Route, RouteGuard};
pub use session::{AuthState, CredentialStore, Session, SessionToken};
pub use shell::Shell;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use theme::{ThemePreference, ThemeStore};
pub use validation::ValidationErrors;
