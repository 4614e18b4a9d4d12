//! Context Menu Component
//!
//! Per-card ⋮ menu with Edit / Run / Statistics / Delete actions. Only one
//! menu is open at a time; the catalog page owns the open-menu signal and
//! closes it on any outside click.

use leptos::prelude::*;

use crate::components::DeleteConfirmButton;

/// Card action menu
#[component]
pub fn ContextMenu(
    is_open: Signal<bool>,
    #[prop(into)] on_toggle: Callback<()>,
    #[prop(into)] on_edit: Callback<()>,
    #[prop(into)] on_run: Callback<()>,
    #[prop(into)] on_statistics: Callback<()>,
    #[prop(into)] on_delete: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="context-menu">
            <button
                class="context-menu-toggle"
                on:click=move |ev| {
                    // Keep the document-level close handler from firing first
                    ev.stop_propagation();
                    on_toggle.run(());
                }
            >
                "⋮"
            </button>

            <Show when=move || is_open.get()>
                <div class="context-menu-list" on:click=move |ev| ev.stop_propagation()>
                    <button class="menu-item" on:click=move |_| on_edit.run(())>
                        "Edit"
                    </button>
                    <button class="menu-item" on:click=move |_| on_run.run(())>
                        "Run"
                    </button>
                    <button class="menu-item" on:click=move |_| on_statistics.run(())>
                        "Statistics"
                    </button>
                    <DeleteConfirmButton
                        button_class="menu-item delete"
                        label="Delete"
                        on_confirm=move |_: ()| on_delete.run(())
                    />
                </div>
            </Show>
        </div>
    }
}
