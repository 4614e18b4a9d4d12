//! Back Button Component

use leptos::prelude::*;

use crate::context::AppContext;

/// Returns to the catalog page
#[component]
pub fn BackButton() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        <button class="back-btn" on:click=move |_| ctx.go_home()>
            "Back"
        </button>
    }
}
