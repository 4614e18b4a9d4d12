//! Questionnaire Catalog Page
//!
//! Paginated listing of questionnaires with a sort select, a classic pager
//! and a "load more" infinite mode driven by an off-screen sentinel. The
//! listing logic lives in [`crate::pagination`]; this component only issues
//! the fetches described by its tickets and feeds the responses back.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::api;
use crate::components::ContextMenu;
use crate::context::{AppContext, Route};
use crate::pagination::{Catalog, FetchMode, FetchTicket, SortKey, PAGE_SIZE};

/// Catalog page with the questionnaire grid
#[component]
pub fn CatalogPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (catalog, set_catalog) = signal(Catalog::new());
    let (open_menu, set_open_menu) = signal(None::<String>);
    let sentinel_ref = NodeRef::<leptos::html::Div>::new();

    // Issue the fetch described by a ticket, then feed the result back. A
    // response for a superseded sort key is recognized by the ticket and
    // dropped by the state machine.
    let run_fetch = move |ticket: FetchTicket| {
        spawn_local(async move {
            match api::get_paginated(ticket.page, PAGE_SIZE, ticket.sort_key).await {
                Ok(res) => {
                    set_catalog.update(|c| {
                        if !c.apply(&ticket, res.questionnaires, res.total) {
                            web_sys::console::log_1(
                                &format!(
                                    "[CATALOG] Discarding stale page {} response",
                                    ticket.page
                                )
                                .into(),
                            );
                        }
                    });
                }
                Err(err) => {
                    web_sys::console::error_1(
                        &format!("[CATALOG] Error loading page {}: {}", ticket.page, err).into(),
                    );
                    set_catalog.update(|c| c.fetch_failed(&ticket));
                }
            }
        });
    };

    // Initial load under the default sort key
    Effect::new(move |_| {
        let mut ticket = None;
        set_catalog.update(|c| ticket = Some(c.set_sort_key(SortKey::default())));
        if let Some(ticket) = ticket {
            run_fetch(ticket);
        }
    });

    // Close any open card menu on outside clicks
    Effect::new(move |_| {
        let cb = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_| {
            set_open_menu.set(None);
        });
        if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
            let _ = doc.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
        }
        cb.forget();
    });

    // Observe the sentinel row while it is mounted (infinite mode only). The
    // controller stays ignorant of the observer: it only sees the trigger.
    let observer_slot = StoredValue::new_local(None::<web_sys::IntersectionObserver>);
    Effect::new(move |_| {
        let element = sentinel_ref.get();
        observer_slot.update_value(|slot| {
            if let Some(observer) = slot.take() {
                observer.disconnect();
            }
        });
        let Some(element) = element else { return };
        let cb = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
            let intersecting = entries.iter().any(|entry| {
                entry
                    .dyn_ref::<web_sys::IntersectionObserverEntry>()
                    .map(|entry| entry.is_intersecting())
                    .unwrap_or(false)
            });
            if intersecting {
                let mut ticket = None;
                set_catalog.update(|c| ticket = c.sentinel_visible());
                if let Some(ticket) = ticket {
                    run_fetch(ticket);
                }
            }
        });
        if let Ok(observer) = web_sys::IntersectionObserver::new(cb.as_ref().unchecked_ref()) {
            observer.observe(&element);
            observer_slot.set_value(Some(observer));
        }
        cb.forget();
    });

    let on_sort_change = move |ev: web_sys::Event| {
        let key = SortKey::from_value(&event_target_value(&ev));
        let mut ticket = None;
        set_catalog.update(|c| ticket = Some(c.set_sort_key(key)));
        if let Some(ticket) = ticket {
            run_fetch(ticket);
        }
    };

    let on_prev = move |_| {
        let mut ticket = None;
        set_catalog.update(|c| ticket = c.prev());
        if let Some(ticket) = ticket {
            run_fetch(ticket);
        }
    };

    let on_next = move |_| {
        let mut ticket = None;
        set_catalog.update(|c| ticket = Some(c.next()));
        if let Some(ticket) = ticket {
            run_fetch(ticket);
        }
    };

    let on_load_more = move |_| set_catalog.update(|c| c.load_more());

    view! {
        <div class="catalog-page">
            <div class="catalog-header">
                <h1>"Quiz Catalog"</h1>
                <button
                    class="create-btn"
                    on:click=move |_| ctx.navigate(Route::Create)
                >
                    "Create Quiz"
                </button>
            </div>

            <Show
                when=move || catalog.with(|c| c.loaded)
                fallback=|| view! { <p class="loading">"Loading..."</p> }
            >
                <div class="sort-row">
                    <label for="sort-by">"Sort by:"</label>
                    <select id="sort-by" on:change=on_sort_change>
                        <option value="createdAt">"Newest"</option>
                        <option value="name">"Name (A-Z)"</option>
                        <option value="questionsCount">"Questions Count"</option>
                        <option value="completions">"Completions"</option>
                    </select>
                </div>

                <div class="quiz-grid">
                    <For
                        each=move || catalog.with(|c| c.items.clone())
                        key=|q| q.id.clone()
                        children=move |q| {
                            let id = q.id.clone();
                            let is_open = {
                                let id = id.clone();
                                Signal::derive(move || {
                                    open_menu.get().as_deref() == Some(id.as_str())
                                })
                            };
                            let on_toggle = {
                                let id = id.clone();
                                move |_: ()| {
                                    set_open_menu.update(|open| {
                                        *open = if open.as_deref() == Some(id.as_str()) {
                                            None
                                        } else {
                                            Some(id.clone())
                                        };
                                    });
                                }
                            };
                            let on_edit = {
                                let id = id.clone();
                                move |_: ()| ctx.navigate(Route::Edit(id.clone()))
                            };
                            let on_run = {
                                let id = id.clone();
                                move |_: ()| ctx.navigate(Route::Run(id.clone()))
                            };
                            let on_statistics = {
                                let id = id.clone();
                                move |_: ()| ctx.navigate(Route::Statistics(id.clone()))
                            };
                            let on_delete = {
                                let id = id.clone();
                                move |_: ()| {
                                    let id = id.clone();
                                    set_open_menu.set(None);
                                    spawn_local(async move {
                                        match api::delete(&id).await {
                                            Ok(()) => set_catalog.update(|c| c.remove(&id)),
                                            Err(err) => {
                                                web_sys::console::error_1(
                                                    &format!(
                                                        "[CATALOG] Error deleting {}: {}",
                                                        id, err
                                                    )
                                                    .into(),
                                                );
                                            }
                                        }
                                    });
                                }
                            };

                            view! {
                                <div class="quiz-card">
                                    <div>
                                        <h3 class="quiz-name">{q.name.clone()}</h3>
                                        <p class="quiz-description">{q.description.clone()}</p>
                                    </div>
                                    <div class="quiz-card-meta">
                                        <p>{format!("Questions: {}", q.questions_count)}</p>
                                        <p>{format!("Completions: {}", q.completions)}</p>
                                    </div>
                                    <ContextMenu
                                        is_open=is_open
                                        on_toggle=on_toggle
                                        on_edit=on_edit
                                        on_run=on_run
                                        on_statistics=on_statistics
                                        on_delete=on_delete
                                    />
                                </div>
                            }
                        }
                    />
                </div>

                // "Load More" switches to infinite mode; only offered before
                // any page navigation happened
                <Show when=move || catalog.with(|c| c.page == 1 && c.page < c.total_pages)>
                    <div class="load-more-row">
                        <button class="load-more-btn" on:click=on_load_more>"Load More"</button>
                    </div>
                </Show>

                // Off-screen sentinel; entering the viewport fetches the next
                // page, at most once per crossing
                <Show when=move || {
                    catalog.with(|c| c.mode == FetchMode::Infinite && c.page < c.total_pages)
                }>
                    <div node_ref=sentinel_ref class="load-sentinel">"Loading..."</div>
                </Show>

                <Show when=move || catalog.with(|c| c.mode == FetchMode::Pager)>
                    <div class="pager">
                        <button
                            on:click=on_prev
                            disabled=move || catalog.with(|c| c.page == 1)
                        >
                            "Previous"
                        </button>
                        <span class="pager-status">
                            {move || catalog.with(|c| format!("{} / {}", c.page, c.total_pages))}
                        </span>
                        <button
                            on:click=on_next
                            disabled=move || catalog.with(|c| c.page == c.total_pages)
                        >
                            "Next"
                        </button>
                    </div>
                </Show>
            </Show>
        </div>
    }
}
