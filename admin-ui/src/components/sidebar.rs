//! Sidebar
//!
//! Links to every protected page; the current one is highlighted.

use leptos::*;
use leptos_router::*;

use crate::state::GlobalState;

const LINKS: &[(&str, &str, &str)] = &[
    ("/", "Dashboard", "📊"),
    ("/bgcarousel", "Background Carousel", "🖼️"),
    ("/storelinks", "Store Links", "🛒"),
    ("/sociallinks", "Social Links", "🔗"),
    ("/navbarbuttons", "Navbar Buttons", "📱"),
    ("/reviews", "Reviews", "⭐"),
];

#[component]
pub fn Sidebar() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <aside class=move || {
            let width = if state.sidebar_open.get() { "w-64" } else { "w-16" };
            format!(
                "{} shrink-0 min-h-screen bg-white dark:bg-zinc-900 border-r \
                 border-gray-200 dark:border-zinc-700 transition-all duration-200",
                width
            )
        }>
            <div class="h-16 flex items-center px-4 font-bold text-lg text-gray-900 dark:text-white">
                {move || if state.sidebar_open.get() { "Site Admin" } else { "SA" }}
            </div>
            <nav class="flex flex-col space-y-1 px-2">
                {LINKS
                    .iter()
                    .map(|&(href, label, icon)| {
                        view! {
                            <A
                                href=href
                                exact=true
                                class="flex items-center space-x-3 px-3 py-2 rounded-lg text-gray-600 \
                                       dark:text-gray-300 hover:bg-gray-100 dark:hover:bg-zinc-800"
                                active_class="bg-blue-600 text-white hover:bg-blue-700"
                            >
                                <span>{icon}</span>
                                <Show when=move || state.sidebar_open.get()>
                                    <span>{label}</span>
                                </Show>
                            </A>
                        }
                    })
                    .collect_view()}
            </nav>
        </aside>
    }
}
