//! Profile Page
//!
//! Signed-in user's details and password change.

use leptos::*;

use crate::api::{self, Profile};
use crate::components::{FieldError, INPUT_CLASS, PRIMARY_BUTTON};
use crate::state::GlobalState;
use crate::validation::{check_password, validate_new_password, FieldErrors};

#[component]
pub fn ProfilePage() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let profile = create_rw_signal(None::<Profile>);

    spawn_local(async move {
        match api::fetch_profile().await {
            Ok(fetched) => profile.set(Some(fetched)),
            Err(e) => state.report("load profile", &e),
        }
    });

    let row = |label: &'static str, value: Option<String>| {
        view! {
            <div class="flex justify-between py-2 border-b border-gray-200 dark:border-zinc-700 last:border-0">
                <span class="text-gray-500 dark:text-gray-400">{label}</span>
                <span>{value.unwrap_or_else(|| "-".to_string())}</span>
            </div>
        }
    };

    view! {
        <div class="p-6 space-y-8 max-w-2xl">
            <h1 class="text-3xl font-bold">"Profile"</h1>

            <section class="bg-white dark:bg-zinc-800 rounded-xl p-6">
                {move || match profile.get() {
                    Some(p) => view! {
                        <div>
                            {row("Name", p.name)}
                            {row("Email", p.email)}
                            {row("Phone", p.phone)}
                            {row("Member since", p.created_at.map(|t| t.chars().take(10).collect()))}
                            {row("API", Some(api::get_api_base()))}
                        </div>
                    }.into_view(),
                    None => view! { <p class="text-gray-500">"Loading..."</p> }.into_view(),
                }}
            </section>

            <ChangePassword />
        </div>
    }
}

#[component]
fn ChangePassword() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let current = create_rw_signal(String::new());
    let new = create_rw_signal(String::new());
    let confirm = create_rw_signal(String::new());
    let errors = create_rw_signal(FieldErrors::new());
    let (saving, set_saving) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let (current_value, new_value, confirm_value) =
            (current.get(), new.get(), confirm.get());

        let mut found = validate_new_password(&new_value, &confirm_value);
        if let Err(message) = check_password(&current_value) {
            found.insert("current", message);
        }
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }

        set_saving.set(true);
        spawn_local(async move {
            match api::change_password(&current_value, &new_value).await {
                Ok(message) => {
                    let message = if message.is_empty() { "Password changed".to_string() } else { message };
                    state.show_success(&message);
                    current.set(String::new());
                    new.set(String::new());
                    confirm.set(String::new());
                }
                Err(e) => state.report("change password", &e),
            }
            set_saving.set(false);
        });
    };

    let field = move |label: &'static str, name: &'static str, value: RwSignal<String>| {
        view! {
            <div>
                <label class="block text-sm mb-1">{label}</label>
                <input
                    type="password"
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                    class=INPUT_CLASS
                />
                <FieldError field=name errors=errors />
            </div>
        }
    };

    view! {
        <section class="bg-white dark:bg-zinc-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Change Password"</h2>
            <form on:submit=on_submit class="space-y-4">
                {field("Current password", "current", current)}
                {field("New password", "password", new)}
                {field("Confirm new password", "confirm", confirm)}
                <button type="submit" disabled=move || saving.get() class=PRIMARY_BUTTON>
                    {move || if saving.get() { "Saving..." } else { "Change Password" }}
                </button>
            </form>
        </section>
    }
}
