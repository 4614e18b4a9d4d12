//! Questionnaire Builder Page
//!
//! Create/edit page: name and description form, the reorderable question
//! list, and a validated save that serializes the sequence for the API.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api;
use crate::components::{BackButton, QuestionList};
use crate::context::AppContext;
use crate::editor;
use crate::models::{Question, QuestionnairePayload};
use crate::store::{store_add_question, BuilderState, BuilderStateStoreFields};

/// Name/description form bound to the builder store
#[component]
fn QuizForm() -> impl IntoView {
    let store = crate::store::use_builder_store();

    view! {
        <div class="quiz-form">
            <div>
                <label for="quiz-name">"Quiz name:"</label>
                <input
                    id="quiz-name"
                    type="text"
                    prop:value=move || store.quiz_name().get()
                    on:input=move |ev| *store.quiz_name().write() = event_target_value(&ev)
                />
            </div>
            <div>
                <label for="quiz-description">"Quiz description:"</label>
                <textarea
                    id="quiz-description"
                    prop:value=move || store.description().get()
                    on:input=move |ev| *store.description().write() = event_target_value(&ev)
                ></textarea>
            </div>
        </div>
    }
}

/// Builder page. With `id` set it edits an existing questionnaire (load then
/// PUT), otherwise it creates a new one (POST).
#[component]
pub fn BuilderPage(id: Option<String>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = Store::new(BuilderState::default());
    provide_context(store);

    let is_edit = id.is_some();

    // Load the existing questionnaire when editing
    if let Some(quiz_id) = id.clone() {
        Effect::new(move |_| {
            let quiz_id = quiz_id.clone();
            spawn_local(async move {
                match api::get_by_id(&quiz_id).await {
                    Ok(detail) => {
                        *store.quiz_name().write() = detail.name;
                        *store.description().write() = detail.description;
                        *store.questions().write() = detail
                            .questions
                            .into_iter()
                            .map(Question::from_wire)
                            .collect();
                    }
                    Err(err) => {
                        web_sys::console::error_1(
                            &format!("[BUILDER] Error loading quiz: {}", err).into(),
                        );
                        *store.error_message().write() = "Failed to load quiz.".to_string();
                    }
                }
            });
        });
    }

    let save_id = id.clone();
    let on_save = move |_| {
        let name = store.quiz_name().get();
        let description = store.description().get();
        let questions = store.questions().get();

        if let Err(message) = editor::validate(&name, &description, &questions) {
            *store.error_message().write() = message;
            return;
        }
        store.error_message().write().clear();

        let payload = QuestionnairePayload {
            name,
            description,
            questions: questions.iter().map(Question::to_wire).collect(),
        };
        let save_id = save_id.clone();
        spawn_local(async move {
            let result = match &save_id {
                Some(quiz_id) => api::update(quiz_id, &payload).await,
                None => api::create(&payload).await,
            };
            match result {
                Ok(()) => ctx.go_home(),
                Err(err) => {
                    web_sys::console::error_1(
                        &format!("[BUILDER] Error saving quiz: {}", err).into(),
                    );
                    *store.error_message().write() =
                        "Failed to save quiz. Please try again.".to_string();
                }
            }
        });
    };

    view! {
        <BackButton />
        <div class="builder-page">
            <h2>{if is_edit { "Edit Quiz" } else { "Create Quiz" }}</h2>

            <QuizForm />

            <QuestionList />

            <div class="builder-actions">
                <button class="add-question-btn" on:click=move |_| store_add_question(&store)>
                    "Add question"
                </button>
                <button class="save-btn" on:click=on_save>"Save"</button>
                {move || {
                    let message = store.error_message().get();
                    (!message.is_empty())
                        .then(move || view! { <div class="error-message">{message}</div> })
                }}
            </div>
        </div>
    }
}
