//! Session Management
//!
//! - **token**: the opaque bearer credential
//! - **store**: persistence of that credential under a fixed key
//! - **state**: the authenticated/unauthenticated state machine

mod state;
mod store;
mod token;

pub use state::{AuthState, Session};
pub use store::{CredentialStore, TOKEN_KEY};
pub use token::SessionToken;
