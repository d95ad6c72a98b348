//! Toasts for the outcome of each content change. Both clear themselves after
//! a few seconds; clicking one dismisses it early.

use leptos::*;

use crate::state::GlobalState;

#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let notice = move |slot: RwSignal<Option<String>>, mark: &'static str, tone: &'static str| {
        move || {
            slot.get().map(|text| view! {
                <button
                    on:click=move |_| slot.set(None)
                    class=format!("flex w-full items-center gap-3 rounded-lg px-4 py-3 text-left text-white shadow-lg {}", tone)
                >
                    <span class="text-lg">{mark}</span>
                    <span class="text-sm font-medium">{text}</span>
                </button>
            })
        }
    };

    view! {
        <div class="fixed top-4 right-4 z-50 w-80 space-y-2">
            {notice(state.success, "✓", "bg-green-600")}
            {notice(state.error, "!", "bg-red-600")}
        </div>
    }
}
