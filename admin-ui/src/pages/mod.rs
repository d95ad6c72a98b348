//! Pages
//!
//! Top-level page components for each route.

pub mod auth;
pub mod carousel;
pub mod dashboard;
pub mod links;
pub mod profile;
pub mod reviews;

pub use auth::{ForgotPassword, Login, Register, ResetPassword};
pub use carousel::BackgroundCarousel;
pub use dashboard::Dashboard;
pub use links::{NavbarButtons, SocialLinks, StoreLinks};
pub use profile::ProfilePage;
pub use reviews::Reviews;
