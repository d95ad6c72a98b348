//! State Management
//!
//! Global application state, theme preference and view list reconciliation.

pub mod global;
pub mod theme;
pub mod view_list;

pub use global::{confirm, provide_global_state, GlobalState};
pub use theme::{provide_theme, Theme};
