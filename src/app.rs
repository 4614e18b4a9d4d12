//! Quiz Builder Frontend App
//!
//! Top-level component switching between the catalog, builder, quiz-taking
//! and statistics pages.

use leptos::prelude::*;

use crate::components::{BuilderPage, CatalogPage, QuizPage, StatisticsPage};
use crate::context::{AppContext, Route};

#[component]
pub fn App() -> impl IntoView {
    let (route, set_route) = signal(Route::Catalog);

    // Provide context to all children
    provide_context(AppContext::new((route, set_route)));

    view! {
        <div class="app-layout">
            {move || match route.get() {
                Route::Catalog => view! { <CatalogPage /> }.into_any(),
                Route::Create => view! { <BuilderPage id=None /> }.into_any(),
                Route::Edit(id) => view! { <BuilderPage id=Some(id) /> }.into_any(),
                Route::Run(id) => view! { <QuizPage id=id /> }.into_any(),
                Route::Statistics(id) => view! { <StatisticsPage id=id /> }.into_any(),
            }}
        </div>
    }
}
