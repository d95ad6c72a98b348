//! Dashboard Page
//!
//! Content counts, refreshed on a fixed interval while the page is mounted.

use leptos::*;

use crate::api::{self, DashboardStats};
use crate::components::StatCard;

/// Refresh period for the counts
const REFRESH_INTERVAL_MS: u32 = 5123;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let stats = create_rw_signal(DashboardStats::default());
    let (loading, set_loading) = create_signal(true);
    let (updated, set_updated) = create_signal(None::<String>);

    let refresh = move || {
        spawn_local(async move {
            match api::fetch_stats().await {
                Ok(fresh) => {
                    stats.set(fresh);
                    set_updated.set(Some(chrono::Local::now().format("%H:%M:%S").to_string()));
                }
                // Previous counts stay on screen
                Err(e) => web_sys::console::error_1(&format!("Failed to refresh dashboard: {}", e).into()),
            }
            set_loading.set(false);
        });
    };

    refresh();
    let interval = gloo_timers::callback::Interval::new(REFRESH_INTERVAL_MS, refresh);
    on_cleanup(move || drop(interval));

    view! {
        <div class="p-6 space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Dashboard"</h1>
                <p class="text-gray-500 dark:text-gray-400 mt-1">"Landing page content at a glance"</p>
            </div>

            <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4">
                <StatCard title="Carousel Images" icon="🖼️" href="/bgcarousel"
                    value=Signal::derive(move || stats.get().images) loading=loading />
                <StatCard title="Store Links" icon="🛒" href="/storelinks"
                    value=Signal::derive(move || stats.get().stores) loading=loading />
                <StatCard title="Links" icon="🔗" href="/sociallinks"
                    value=Signal::derive(move || stats.get().links) loading=loading />
                <StatCard title="Reviews" icon="⭐" href="/reviews"
                    value=Signal::derive(move || stats.get().reviews) loading=loading />
            </div>

            <p class="text-sm text-gray-500 dark:text-gray-400">
                {move || updated.get().map(|t| format!("Updated at {}", t)).unwrap_or_default()}
            </p>
        </div>
    }
}
