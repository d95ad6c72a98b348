//! Stat Card Component
//!
//! One dashboard count with a link to the page that manages it.

use leptos::*;
use leptos_router::*;

#[component]
pub fn StatCard(
    title: &'static str,
    icon: &'static str,
    href: &'static str,
    #[prop(into)]
    value: Signal<usize>,
    #[prop(into)]
    loading: Signal<bool>,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="block bg-white dark:bg-zinc-800 rounded-xl p-6 shadow hover:shadow-lg transition-shadow"
        >
            <div class="flex items-center justify-between">
                <span class="text-sm text-gray-500 dark:text-gray-400">{title}</span>
                <span class="text-2xl">{icon}</span>
            </div>
            <div class="mt-3 text-3xl font-bold text-gray-900 dark:text-white">
                {move || if loading.get() { "…".to_string() } else { value.get().to_string() }}
            </div>
        </A>
    }
}
