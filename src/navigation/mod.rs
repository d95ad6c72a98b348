//! Navigation
//!
//! Route table, the current-location handle, and the guard that decides
//! whether a destination may be rendered.

mod guard;
mod navigator;
mod route;

pub use guard::{Access, RouteGuard};
pub use navigator::Navigator;
pub use route::Route;
