//! Console-wide State
//!
//! Session flag, sidebar and toast slots shared by the layout and every page.

use leptos::*;

use crate::api;

#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Whether a session token is stored
    pub signed_in: RwSignal<bool>,
    /// Sidebar expanded
    pub sidebar_open: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        signed_in: create_rw_signal(api::has_token()),
        sidebar_open: create_rw_signal(true),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Toast a confirmation for three seconds
    pub fn show_success(&self, message: &str) {
        flash(self.success, message, 3000);
    }

    /// Toast a failure for five seconds
    pub fn show_error(&self, message: &str) {
        flash(self.error, message, 5000);
    }

    /// Log a failed call and toast its user-facing message
    pub fn report(&self, action: &str, error: &api::ApiError) {
        web_sys::console::error_1(&format!("Failed to {}: {}", action, error).into());
        self.show_error(&error.user_message());
    }

    pub fn sign_out(&self) {
        api::logout();
        self.signed_in.set(false);
    }
}

fn flash(slot: RwSignal<Option<String>>, message: &str, millis: u32) {
    slot.set(Some(message.to_string()));
    gloo_timers::callback::Timeout::new(millis, move || slot.set(None)).forget();
}

/// Ask the browser to confirm a destructive action
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}
