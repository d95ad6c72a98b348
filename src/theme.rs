//! Theme preference
//!
//! Light or dark, persisted under the `theme` key so it survives restarts.

use std::fmt;
use std::sync::Arc;

use crate::storage::{KeyValueStorage, StorageResult};

/// Storage key holding the preference
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    /// Absent or unrecognised values fall back to light
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("dark") => ThemePreference::Dark,
            _ => ThemePreference::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads and writes the persisted preference
#[derive(Clone)]
pub struct ThemeStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl ThemeStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    pub fn current(&self) -> ThemePreference {
        match self.storage.get(THEME_KEY) {
            Ok(value) => ThemePreference::parse(value.as_deref()),
            Err(e) => {
                tracing::warn!("Failed to read theme preference: {}", e);
                ThemePreference::default()
            }
        }
    }

    pub fn set(&self, theme: ThemePreference) -> StorageResult<()> {
        self.storage.set(THEME_KEY, theme.as_str())
    }

    /// Flip and persist; returns the new preference
    pub fn toggle(&self) -> StorageResult<ThemePreference> {
        let next = self.current().toggled();
        self.set(next)?;
        Ok(next)
    }
}
