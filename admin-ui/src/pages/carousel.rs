//! Background Carousel Page

use leptos::*;

use crate::api::{self, models::CarouselImage, Entity};
use crate::components::{picked_file, preview_url, Modal, PRIMARY_BUTTON};
use crate::state::{confirm, view_list, GlobalState};

#[component]
pub fn BackgroundCarousel() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let images = create_rw_signal(Vec::<CarouselImage>::new());
    let editing = create_rw_signal(None::<CarouselImage>);
    let modal_open = create_rw_signal(false);
    let file = create_rw_signal(None::<web_sys::File>);
    let preview = create_rw_signal(None::<String>);
    let (saving, set_saving) = create_signal(false);

    spawn_local(async move {
        match api::list::<CarouselImage>().await {
            Ok(items) => images.set(items),
            Err(e) => state.report("load images", &e),
        }
    });

    let close = move || {
        modal_open.set(false);
        editing.set(None);
        file.set(None);
        preview.set(None);
    };

    let open_edit = move |image: CarouselImage| {
        preview.set(Some(image.image_url.clone()));
        editing.set(Some(image));
        modal_open.set(true);
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(picked) = file.get_untracked() else {
            state.show_error("Choose an image to upload");
            return;
        };
        let form = match web_sys::FormData::new() {
            Ok(form) => form,
            Err(_) => return,
        };
        if form.append_with_blob_and_filename("image", &picked, &picked.name()).is_err() {
            state.show_error("Could not read the selected file");
            return;
        }

        let target = editing.get_untracked();
        set_saving.set(true);
        spawn_local(async move {
            let result = match &target {
                Some(image) => api::update_form::<CarouselImage>(image.id(), form).await,
                None => api::create_form::<CarouselImage>(form).await,
            };
            match result {
                Ok(saved) => {
                    let updated = target.is_some();
                    images.update(|list| {
                        if updated {
                            view_list::replace(list, saved);
                        } else {
                            view_list::append(list, saved);
                        }
                    });
                    state.show_success(if updated { "Image updated" } else { "Image added" });
                    close();
                }
                Err(e) => state.report("save image", &e),
            }
            set_saving.set(false);
        });
    };

    let on_delete = move |id: String| {
        if !confirm("Delete this image?") {
            return;
        }
        spawn_local(async move {
            match api::remove::<CarouselImage>(&id).await {
                Ok(()) => {
                    images.update(|list| view_list::remove(list, &id));
                    state.show_success("Image deleted");
                }
                Err(e) => state.report("delete image", &e),
            }
        });
    };

    view! {
        <div class="p-6 space-y-6">
            <div class="flex justify-between items-center">
                <h1 class="text-2xl font-bold">"Background Carousel"</h1>
                <button on:click=move |_| modal_open.set(true) class=PRIMARY_BUTTON>"Add Image"</button>
            </div>

            <Show
                when=move || !images.with(Vec::is_empty)
                fallback=|| view! { <p class="text-center text-gray-500">"No data available"</p> }
            >
                <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4">
                    <For
                        each=move || images.get()
                        key=|image| (image.id.clone(), image.image_url.clone())
                        children=move |image| {
                            let id = image.id.clone();
                            let url = image.image_url.clone();
                            view! {
                                <div class="bg-white dark:bg-zinc-800 rounded-xl shadow overflow-hidden">
                                    <img src=url class="w-full h-40 object-cover" alt="carousel" />
                                    <div class="flex justify-end space-x-2 p-3">
                                        <button on:click=move |_| open_edit(image.clone()) class="text-blue-600">"Edit"</button>
                                        <button on:click=move |_| on_delete(id.clone()) class="text-red-600">"Delete"</button>
                                    </div>
                                </div>
                            }
                        }
                    />
                </div>
            </Show>

            <Modal
                title=Signal::derive(move || if editing.with(Option::is_some) { "Replace Image".to_string() } else { "Add Image".to_string() })
                open=modal_open
                on_close=move |_| close()
            >
                <form on:submit=on_submit class="space-y-4">
                    <input
                        type="file"
                        accept="image/*"
                        on:change=move |ev| {
                            let picked = picked_file(&ev);
                            preview.set(picked.as_ref().and_then(preview_url));
                            file.set(picked);
                        }
                    />
                    {move || preview.get().map(|src| view! {
                        <img src=src class="w-full h-40 object-cover rounded" alt="preview" />
                    })}
                    <div class="flex justify-end space-x-2">
                        <button type="button" on:click=move |_| close() class="px-4 py-2">"Cancel"</button>
                        <button type="submit" disabled=move || saving.get() class=PRIMARY_BUTTON>
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </Modal>
        </div>
    }
}
