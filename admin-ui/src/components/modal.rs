//! Modal dialog and form helpers shared by the management pages.

use leptos::*;
use wasm_bindgen::JsCast;

use crate::validation::FieldErrors;

#[component]
pub fn Modal(
    #[prop(into)]
    title: Signal<String>,
    open: RwSignal<bool>,
    #[prop(into)]
    on_close: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <div class="fixed inset-0 z-40 flex items-center justify-center bg-black/50">
                <div class="w-full max-w-lg bg-white dark:bg-zinc-800 rounded-xl shadow-xl p-6">
                    <div class="flex items-center justify-between mb-4">
                        <h2 class="text-xl font-semibold text-gray-900 dark:text-white">
                            {move || title.get()}
                        </h2>
                        <button
                            on:click=move |_| on_close.call(())
                            class="text-gray-400 hover:text-gray-600"
                        >
                            "✕"
                        </button>
                    </div>
                    {children()}
                </div>
            </div>
        </Show>
    }
}

/// Message for `field`, shown under its input
#[component]
pub fn FieldError(
    field: &'static str,
    #[prop(into)]
    errors: Signal<FieldErrors>,
) -> impl IntoView {
    view! {
        {move || {
            errors.with(|errors| errors.get(field).cloned()).map(|message| view! {
                <p class="mt-1 text-sm text-red-600">{message}</p>
            })
        }}
    }
}

/// First file picked in a file input
pub fn picked_file(ev: &ev::Event) -> Option<web_sys::File> {
    let input: web_sys::HtmlInputElement = ev.target()?.dyn_into().ok()?;
    input.files()?.get(0)
}

/// Local preview URL for a picked file
pub fn preview_url(file: &web_sys::File) -> Option<String> {
    web_sys::Url::create_object_url_with_blob(file).ok()
}

pub const INPUT_CLASS: &str = "w-full px-4 py-2 rounded-lg border border-gray-300 dark:border-zinc-600 \
     bg-gray-50 dark:bg-zinc-900 text-gray-900 dark:text-white focus:ring-2 focus:ring-blue-500 outline-none";

pub const PRIMARY_BUTTON: &str = "px-4 py-2 bg-blue-600 hover:bg-blue-700 disabled:bg-gray-400 \
     text-white rounded-lg font-medium transition-colors";
