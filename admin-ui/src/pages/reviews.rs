//! Reviews Page

use leptos::*;

use crate::api::{
    self,
    models::{stars, Review},
    Entity,
};
use crate::components::{picked_file, preview_url, FieldError, Modal, INPUT_CLASS, PRIMARY_BUTTON};
use crate::state::{confirm, view_list, GlobalState};
use crate::validation::{validate_review, FieldErrors};

fn today() -> String {
    chrono::Local::now().format("%d/%m/%Y").to_string()
}

#[derive(Clone, Copy)]
struct ReviewForm {
    name: RwSignal<String>,
    game: RwSignal<String>,
    comment: RwSignal<String>,
    rating: RwSignal<u8>,
    date: RwSignal<String>,
    avatar: RwSignal<Option<web_sys::File>>,
    preview: RwSignal<Option<String>>,
}

impl ReviewForm {
    fn new() -> Self {
        Self {
            name: create_rw_signal(String::new()),
            game: create_rw_signal(String::new()),
            comment: create_rw_signal(String::new()),
            rating: create_rw_signal(5),
            date: create_rw_signal(today()),
            avatar: create_rw_signal(None),
            preview: create_rw_signal(None),
        }
    }

    fn reset(&self) {
        self.fill(None);
    }

    fn fill(&self, review: Option<&Review>) {
        self.name.set(review.map(|r| r.name.clone()).unwrap_or_default());
        self.game.set(review.map(|r| r.game.clone()).unwrap_or_default());
        self.comment.set(review.map(|r| r.comment.clone()).unwrap_or_default());
        self.rating.set(review.map(|r| r.rating).unwrap_or(5));
        self.date.set(review.map(|r| r.date.clone()).unwrap_or_else(today));
        self.avatar.set(None);
        self.preview.set(review.and_then(|r| r.avatar.clone()));
    }

    fn validate(&self) -> FieldErrors {
        validate_review(
            &self.name.get_untracked(),
            &self.game.get_untracked(),
            &self.comment.get_untracked(),
            self.rating.get_untracked(),
            &self.date.get_untracked(),
        )
    }

    fn to_form_data(&self) -> Option<web_sys::FormData> {
        let form = web_sys::FormData::new().ok()?;
        form.append_with_str("name", self.name.get_untracked().trim()).ok()?;
        form.append_with_str("game", self.game.get_untracked().trim()).ok()?;
        form.append_with_str("comment", self.comment.get_untracked().trim()).ok()?;
        form.append_with_str("rating", &self.rating.get_untracked().to_string()).ok()?;
        form.append_with_str("date", self.date.get_untracked().trim()).ok()?;
        if let Some(file) = self.avatar.get_untracked() {
            form.append_with_blob_and_filename("avatar", &file, &file.name()).ok()?;
        }
        Some(form)
    }
}

#[component]
pub fn Reviews() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let reviews = create_rw_signal(Vec::<Review>::new());
    let editing = create_rw_signal(None::<String>);
    let modal_open = create_rw_signal(false);
    let errors = create_rw_signal(FieldErrors::new());
    let (saving, set_saving) = create_signal(false);
    let form = ReviewForm::new();

    spawn_local(async move {
        match api::list::<Review>().await {
            Ok(items) => reviews.set(items),
            Err(e) => state.report("load reviews", &e),
        }
    });

    let close = move || {
        modal_open.set(false);
        editing.set(None);
        errors.set(FieldErrors::new());
        form.reset();
    };

    let open_edit = move |review: Review| {
        form.fill(Some(&review));
        editing.set(Some(review.id));
        modal_open.set(true);
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let found = form.validate();
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }
        let Some(body) = form.to_form_data() else {
            state.show_error("Could not prepare the review form");
            return;
        };

        let target = editing.get_untracked();
        set_saving.set(true);
        spawn_local(async move {
            let result = match &target {
                Some(id) => api::update_form::<Review>(id, body).await,
                None => api::create_form::<Review>(body).await,
            };
            match result {
                Ok(saved) => {
                    let updated = target.is_some();
                    reviews.update(|list| {
                        if updated {
                            view_list::replace(list, saved);
                        } else {
                            view_list::append(list, saved);
                        }
                    });
                    state.show_success(if updated { "Review updated" } else { "Review added" });
                    close();
                }
                Err(e) => state.report("save review", &e),
            }
            set_saving.set(false);
        });
    };

    let on_delete = move |id: String| {
        if !confirm("Are you sure you want to delete this review?") {
            return;
        }
        spawn_local(async move {
            match api::remove::<Review>(&id).await {
                Ok(()) => {
                    reviews.update(|list| view_list::remove(list, &id));
                    state.show_success("Review deleted");
                }
                Err(e) => state.report("delete review", &e),
            }
        });
    };

    view! {
        <div class="p-6 space-y-6">
            <div class="flex justify-between items-center">
                <h1 class="text-2xl font-bold">"Reviews Management"</h1>
                <button on:click=move |_| modal_open.set(true) class=PRIMARY_BUTTON>"Add New Review"</button>
            </div>

            <Show
                when=move || !reviews.with(Vec::is_empty)
                fallback=|| view! { <p class="text-center text-gray-500">"No reviews yet"</p> }
            >
                <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                    {move || {
                        reviews
                            .get()
                            .into_iter()
                            .map(|review| {
                                let id = review.id().to_string();
                                let avatar = review.avatar.clone().filter(|a| !a.is_empty());
                                let rating = stars(review.rating);
                                let (name, game, comment, date) = (
                                    review.name.clone(),
                                    review.game.clone(),
                                    review.comment.clone(),
                                    review.date.clone(),
                                );
                                view! {
                                    <div class="bg-white dark:bg-zinc-800 rounded-xl shadow p-5 space-y-3">
                                        <div class="flex items-center space-x-3">
                                            {avatar.map(|src| view! {
                                                <img src=src class="w-10 h-10 rounded-full object-cover" alt="avatar" />
                                            })}
                                            <div>
                                                <div class="font-semibold">{name}</div>
                                                <div class="text-sm text-gray-500">{game}</div>
                                            </div>
                                        </div>
                                        <div class="text-yellow-400">{rating}</div>
                                        <p class="text-sm">{comment}</p>
                                        <div class="flex justify-between items-center text-xs text-gray-500">
                                            <span>{date}</span>
                                            <span class="space-x-2">
                                                <button on:click=move |_| open_edit(review.clone()) class="text-blue-600">"Edit"</button>
                                                <button on:click=move |_| on_delete(id.clone()) class="text-red-600">"Delete"</button>
                                            </span>
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </Show>

            <Modal
                title=Signal::derive(move || {
                    if editing.with(Option::is_some) { "Edit Review".to_string() } else { "Add Review".to_string() }
                })
                open=modal_open
                on_close=move |_| close()
            >
                {
                    view! {
                        <form on:submit=on_submit class="space-y-3">
                            <input placeholder="Name" class=INPUT_CLASS
                                prop:value=move || form.name.get()
                                on:input=move |ev| form.name.set(event_target_value(&ev)) />
                            <FieldError field="name" errors=errors />
                            <input placeholder="Game" class=INPUT_CLASS
                                prop:value=move || form.game.get()
                                on:input=move |ev| form.game.set(event_target_value(&ev)) />
                            <FieldError field="game" errors=errors />
                            <textarea placeholder="Comment" class=INPUT_CLASS
                                prop:value=move || form.comment.get()
                                on:input=move |ev| form.comment.set(event_target_value(&ev)) />
                            <FieldError field="comment" errors=errors />
                            <div class="flex space-x-3">
                                <select class=INPUT_CLASS
                                    prop:value=move || form.rating.get().to_string()
                                    on:change=move |ev| form.rating.set(event_target_value(&ev).parse().unwrap_or(0))
                                >
                                    {(1..=5u8).rev().map(|n| view! { <option value=n.to_string()>{stars(n)}</option> }).collect_view()}
                                </select>
                                <input placeholder="dd/mm/yyyy" class=INPUT_CLASS
                                    prop:value=move || form.date.get()
                                    on:input=move |ev| form.date.set(event_target_value(&ev)) />
                            </div>
                            <FieldError field="rating" errors=errors />
                            <FieldError field="date" errors=errors />
                            <div class="flex items-center space-x-3">
                                {move || form.preview.get().map(|src| view! {
                                    <img src=src class="w-12 h-12 rounded-full object-cover" alt="avatar preview" />
                                })}
                                <input type="file" accept="image/*" on:change=move |ev| {
                                    let picked = picked_file(&ev);
                                    if let Some(url) = picked.as_ref().and_then(preview_url) {
                                        form.preview.set(Some(url));
                                    }
                                    form.avatar.set(picked);
                                } />
                            </div>
                            <div class="flex justify-end space-x-2">
                                <button type="button" on:click=move |_| close() class="px-4 py-2">"Cancel"</button>
                                <button type="submit" disabled=move || saving.get() class=PRIMARY_BUTTON>
                                    {move || if saving.get() { "Saving..." } else { "Save" }}
                                </button>
                            </div>
                        </form>
                    }
                }
            </Modal>
        </div>
    }
}
