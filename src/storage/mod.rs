//! Durable Key-Value Storage
//!
//! The console keeps two values across runs: the bearer token and the theme
//! preference. Both live in a flat string map addressed by fixed keys, the
//! same shape as browser `localStorage`.
//!
//! - **file**: JSON document on disk, rewritten atomically on every change
//! - **memory**: process-local map used by tests and ephemeral sessions
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use site_admin::storage::{FileStorage, KeyValueStorage};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let storage = FileStorage::open("./site-admin-data/storage.json")?;
//!     storage.set("theme", "dark")?;
//!     assert_eq!(storage.get("theme")?.as_deref(), Some("dark"));
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod file;
pub mod memory;

pub use error::{StorageError, StorageResult};
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// A durable string map.
///
/// Implementations must make each individual operation atomic; callers never
/// hold a lock across operations.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}
