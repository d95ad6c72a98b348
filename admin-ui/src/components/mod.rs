//! UI Components
//!
//! Shell pieces and form helpers shared by the pages.

pub mod modal;
pub mod sidebar;
pub mod stat_card;
pub mod toast;
pub mod topbar;

pub use modal::{picked_file, preview_url, FieldError, Modal, INPUT_CLASS, PRIMARY_BUTTON};
pub use sidebar::Sidebar;
pub use stat_card::StatCard;
pub use toast::Toast;
pub use topbar::TopBar;
