//! Site Admin Console
//!
//! Browser console for the landing page backend built with Leptos (WASM).
//!
//! # Features
//!
//! - Sign in, registration and password reset
//! - Dashboard with periodically refreshed content counts
//! - Management pages for the carousel, store links, social links, navbar
//!   buttons and reviews
//! - Persisted dark mode
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. The bearer token and theme live in `localStorage`; every
//! request goes through [`api::client`], which signs the session out on a 401.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;
mod validation;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
