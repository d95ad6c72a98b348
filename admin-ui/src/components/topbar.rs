//! Top bar with sidebar toggle, dark mode toggle and user menu.

use leptos::*;
use leptos_router::*;

use crate::state::{GlobalState, Theme};

#[component]
pub fn TopBar() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (menu_open, set_menu_open) = create_signal(false);
    let navigate = use_navigate();

    let logout = move |_| {
        set_menu_open.set(false);
        state.sign_out();
        state.show_success("Signed out");
        navigate("/login", Default::default());
    };

    view! {
        <header class="h-16 flex items-center justify-between px-4 bg-white dark:bg-zinc-900 \
                       border-b border-gray-200 dark:border-zinc-700">
            <button
                on:click=move |_| state.sidebar_open.update(|open| *open = !*open)
                class="p-2 rounded-lg hover:bg-gray-100 dark:hover:bg-zinc-800"
                title="Toggle sidebar"
            >
                "☰"
            </button>

            <div class="flex items-center space-x-3">
                <DarkModeToggle />

                <div class="relative">
                    <button
                        on:click=move |_| set_menu_open.update(|open| *open = !*open)
                        class="w-9 h-9 rounded-full bg-gray-200 dark:bg-zinc-700"
                        title="Account"
                    >
                        "👤"
                    </button>
                    <Show when=move || menu_open.get()>
                        <div class="absolute right-0 mt-2 w-40 rounded-lg shadow-lg bg-white \
                                    dark:bg-zinc-800 py-1 z-40">
                            <Show
                                when=move || state.signed_in.get()
                                fallback=move || view! {
                                    <A href="/login" class="block px-4 py-2 hover:bg-gray-100 dark:hover:bg-zinc-700">
                                        "Login"
                                    </A>
                                }
                            >
                                <A
                                    href="/profile"
                                    on:click=move |_| set_menu_open.set(false)
                                    class="block px-4 py-2 hover:bg-gray-100 dark:hover:bg-zinc-700"
                                >
                                    "Profile"
                                </A>
                                <button
                                    on:click=logout.clone()
                                    class="w-full text-left px-4 py-2 text-red-600 hover:bg-gray-100 \
                                           dark:hover:bg-zinc-700"
                                >
                                    "Logout"
                                </button>
                            </Show>
                        </div>
                    </Show>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn DarkModeToggle() -> impl IntoView {
    let theme = use_context::<Theme>().expect("Theme not found");

    view! {
        <button
            on:click=move |_| theme.toggle()
            class="p-2 rounded-lg hover:bg-gray-100 dark:hover:bg-zinc-800"
            title="Toggle dark mode"
        >
            {move || if theme.is_dark() { "☀️" } else { "🌙" }}
        </button>
    }
}
