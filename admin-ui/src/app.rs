//! App Root Component
//!
//! Routing, global providers and the guarded shell.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{Sidebar, Toast, TopBar};
use crate::pages::{
    BackgroundCarousel, Dashboard, ForgotPassword, Login, NavbarButtons, ProfilePage, Register,
    ResetPassword, Reviews, SocialLinks, StoreLinks,
};
use crate::state::{provide_global_state, provide_theme};

/// Pages rendered without sidebar and top bar
const AUTH_PREFIXES: &[&str] = &["/login", "/register", "/forgot-password", "/reset-password"];

pub fn is_auth_path(path: &str) -> bool {
    AUTH_PREFIXES
        .iter()
        .any(|prefix| path == *prefix || path.starts_with(&format!("{}/", prefix)))
}

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();
    provide_theme();

    view! {
        <Router>
            <Layout>
                <Routes>
                    <Route path="/login" view=Login />
                    <Route path="/register" view=Register />
                    <Route path="/forgot-password" view=ForgotPassword />
                    <Route path="/reset-password/:token" view=ResetPassword />

                    <Route path="/" view=|| view! { <Protected><Dashboard /></Protected> } />
                    <Route path="/bgcarousel" view=|| view! { <Protected><BackgroundCarousel /></Protected> } />
                    <Route path="/storelinks" view=|| view! { <Protected><StoreLinks /></Protected> } />
                    <Route path="/sociallinks" view=|| view! { <Protected><SocialLinks /></Protected> } />
                    <Route path="/navbarbuttons" view=|| view! { <Protected><NavbarButtons /></Protected> } />
                    <Route path="/reviews" view=|| view! { <Protected><Reviews /></Protected> } />
                    <Route path="/profile" view=|| view! { <Protected><ProfilePage /></Protected> } />

                    <Route path="/*any" view=|| view! { <Redirect path="/" /> } />
                </Routes>
            </Layout>
            <Toast />
        </Router>
    }
}

/// Shell around the routed page; auth pages get the bare page
#[component]
fn Layout(children: Children) -> impl IntoView {
    let location = use_location();
    let bare = move || is_auth_path(&location.pathname.get());
    let content = children();

    view! {
        <div class="min-h-screen flex bg-gray-100 dark:bg-zinc-950 text-gray-900 dark:text-white">
            <Show when=move || !bare()>
                <Sidebar />
            </Show>
            <div class="flex-1 flex flex-col">
                <Show when=move || !bare()>
                    <TopBar />
                </Show>
                <main class="flex-1">{content}</main>
            </div>
        </div>
    }
}

/// Renders its children only while a session token is stored
#[component]
fn Protected(children: ChildrenFn) -> impl IntoView {
    move || {
        if api::has_token() {
            children().into_view()
        } else {
            view! { <Redirect path="/login" /> }.into_view()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_paths_hide_shell() {
        assert!(is_auth_path("/login"));
        assert!(is_auth_path("/reset-password/abc123"));
        assert!(!is_auth_path("/"));
        assert!(!is_auth_path("/reviews"));
        assert!(!is_auth_path("/loginx"));
    }
}
