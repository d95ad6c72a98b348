//! Link Pages
//!
//! Store links, social links and navbar buttons share one page layout: a
//! table of picker value and URL with an add/edit modal.

use leptos::*;

use crate::api::{
    self,
    models::{display_name, NavbarLink, SocialLink, StoreLink},
    LinkEntity,
};
use crate::components::{FieldError, Modal, INPUT_CLASS, PRIMARY_BUTTON};
use crate::state::{confirm, view_list, GlobalState};
use crate::validation::{check_url, FieldErrors};

#[component]
pub fn StoreLinks() -> impl IntoView {
    link_page::<StoreLink>("Store Links", "Store")
}

#[component]
pub fn SocialLinks() -> impl IntoView {
    link_page::<SocialLink>("Social Links", "Platform")
}

#[component]
pub fn NavbarButtons() -> impl IntoView {
    link_page::<NavbarLink>("Navbar Buttons", "Label")
}

fn body<E: LinkEntity>(kind: &str, url: &str) -> serde_json::Value {
    let mut body = serde_json::Map::new();
    body.insert(E::FIELD.to_string(), kind.into());
    body.insert("url".to_string(), url.trim().into());
    serde_json::Value::Object(body)
}

fn link_page<E: LinkEntity>(title: &'static str, kind_label: &'static str) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let default_kind = E::OPTIONS[0].0.to_string();

    let links = create_rw_signal(Vec::<E>::new());
    let editing = create_rw_signal(None::<String>);
    let modal_open = create_rw_signal(false);
    let kind = create_rw_signal(default_kind.clone());
    let url = create_rw_signal(String::new());
    let errors = create_rw_signal(FieldErrors::new());
    let (saving, set_saving) = create_signal(false);

    spawn_local(async move {
        match api::list::<E>().await {
            Ok(items) => links.set(items),
            Err(e) => state.report(&format!("load {}", title.to_lowercase()), &e),
        }
    });

    let close = {
        let default_kind = default_kind.clone();
        move || {
            modal_open.set(false);
            editing.set(None);
            kind.set(default_kind.clone());
            url.set(String::new());
            errors.set(FieldErrors::new());
        }
    };

    let open_edit = move |link: E| {
        kind.set(link.kind().to_string());
        url.set(link.url().to_string());
        editing.set(Some(link.id().to_string()));
        modal_open.set(true);
    };

    let on_submit = {
        let close = close.clone();
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            let mut found = FieldErrors::new();
            if let Err(message) = check_url(&url.get_untracked()) {
                found.insert("url", message);
            }
            let valid = found.is_empty();
            errors.set(found);
            if !valid {
                return;
            }

            let body = body::<E>(&kind.get_untracked(), &url.get_untracked());
            let target = editing.get_untracked();
            let close = close.clone();
            set_saving.set(true);
            spawn_local(async move {
                let result = match &target {
                    Some(id) => api::update_json::<E, _>(id, &body).await,
                    None => api::create_json::<E, _>(&body).await,
                };
                match result {
                    Ok(saved) => {
                        let updated = target.is_some();
                        links.update(|list| {
                            if updated {
                                view_list::replace(list, saved);
                            } else {
                                view_list::append(list, saved);
                            }
                        });
                        state.show_success(&format!(
                            "{} {}",
                            E::LABEL,
                            if updated { "updated" } else { "added" }
                        ));
                        close();
                    }
                    Err(e) => state.report(&format!("save {}", E::LABEL.to_lowercase()), &e),
                }
                set_saving.set(false);
            });
        }
    };

    let on_delete = move |id: String| {
        if !confirm(&format!("Delete this {}?", E::LABEL.to_lowercase())) {
            return;
        }
        spawn_local(async move {
            match api::remove::<E>(&id).await {
                Ok(()) => {
                    links.update(|list| view_list::remove(list, &id));
                    state.show_success(&format!("{} deleted", E::LABEL));
                }
                Err(e) => state.report(&format!("delete {}", E::LABEL.to_lowercase()), &e),
            }
        });
    };

    let close_modal = close.clone();
    let cancel = close;

    view! {
        <div class="p-6 space-y-6">
            <div class="flex justify-between items-center">
                <h1 class="text-2xl font-bold">{title}</h1>
                <button on:click=move |_| modal_open.set(true) class=PRIMARY_BUTTON>"Add New"</button>
            </div>

            <table class="min-w-full text-sm text-left bg-white dark:bg-zinc-900 rounded-xl overflow-hidden">
                <thead class="bg-gray-100 dark:bg-zinc-800">
                    <tr>
                        <th class="px-4 py-3">{kind_label}</th>
                        <th class="px-4 py-3">"URL"</th>
                        <th class="px-4 py-3">"Actions"</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-gray-200 dark:divide-zinc-700">
                    <Show when=move || links.with(Vec::is_empty)>
                        <tr>
                            <td colspan="3" class="px-4 py-4 text-center text-gray-500">"No data available"</td>
                        </tr>
                    </Show>
                    <For
                        each=move || links.get()
                        key=|link| (link.id().to_string(), link.kind().to_string(), link.url().to_string())
                        children=move |link: E| {
                            let id = link.id().to_string();
                            let name = display_name(E::OPTIONS, link.kind());
                            let href = link.url().to_string();
                            view! {
                                <tr class="hover:bg-gray-50 dark:hover:bg-zinc-800">
                                    <td class="px-4 py-3">{name}</td>
                                    <td class="px-4 py-3">
                                        <a href=href.clone() target="_blank" class="text-blue-600 hover:underline">{href}</a>
                                    </td>
                                    <td class="px-4 py-3 space-x-2">
                                        <button on:click=move |_| open_edit(link.clone()) class="text-blue-600">"Edit"</button>
                                        <button on:click=move |_| on_delete(id.clone()) class="text-red-600">"Delete"</button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <Modal
                title=Signal::derive(move || {
                    let verb = if editing.with(Option::is_some) { "Edit" } else { "Add" };
                    format!("{} {}", verb, E::LABEL)
                })
                open=modal_open
                on_close=move |_| close_modal()
            >
                <form on:submit=on_submit.clone() class="space-y-4">
                    <div>
                        <label class="block text-sm mb-1">{kind_label}</label>
                        <select
                            on:change=move |ev| kind.set(event_target_value(&ev))
                            prop:value=move || kind.get()
                            class=INPUT_CLASS
                        >
                            {E::OPTIONS
                                .iter()
                                .map(|&(value, name)| view! { <option value=value>{name}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <div>
                        <label class="block text-sm mb-1">"URL"</label>
                        <input
                            type="url"
                            prop:value=move || url.get()
                            on:input=move |ev| url.set(event_target_value(&ev))
                            class=INPUT_CLASS
                        />
                        <FieldError field="url" errors=errors />
                    </div>
                    <div class="flex justify-end space-x-2">
                        <button type="button" on:click={
                            let cancel = cancel.clone();
                            move |_| cancel()
                        } class="px-4 py-2">"Cancel"</button>
                        <button type="submit" disabled=move || saving.get() class=PRIMARY_BUTTON>
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </Modal>
        </div>
    }
}
