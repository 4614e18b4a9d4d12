//! Question List Component
//!
//! The builder's reorderable editor: drag to reorder questions, and options
//! within one question. Uses leptos-sortable with two nesting scopes; an
//! option drag is keyed by its question's id and never leaves that question.

use leptos::prelude::*;

use leptos_sortable::{
    bind_global_mouseup, create_sort_signals, make_on_mousedown, DragHandle, SortSignals,
};

use crate::models::{AnswerOption, Question, QuestionType};
use crate::store::{
    store_add_option, store_move_option, store_move_question, store_remove_option,
    store_remove_question, store_update_option_text, store_update_question_text,
    store_update_question_type, use_builder_store, BuilderStateStoreFields,
};

/// Scope name for the top-level question list
const QUESTION_SCOPE: &str = "questions";

const OPTION_SCOPE_PREFIX: &str = "options-";

fn option_scope(question_id: &str) -> String {
    format!("{}{}", OPTION_SCOPE_PREFIX, question_id)
}

/// Reorderable question list with per-question option editing
#[component]
pub fn QuestionList() -> impl IntoView {
    let store = use_builder_store();

    // Create DnD signals
    let sort = create_sort_signals();

    // Bind global mouseup handler: one move per completed gesture, routed to
    // the collection the drag started in
    bind_global_mouseup(sort, move |dragged: DragHandle, target_id: String| {
        if dragged.scope == QUESTION_SCOPE {
            store_move_question(&store, &dragged.id, &target_id);
        } else if let Some(question_id) = dragged.scope.strip_prefix(OPTION_SCOPE_PREFIX) {
            store_move_option(&store, question_id, &dragged.id, &target_id);
        }
    });

    view! {
        <div class="question-list">
            <For
                each=move || {
                    store.questions().get().into_iter().enumerate().collect::<Vec<_>>()
                }
                key=|(index, q)| (*index, q.id.clone(), q.question_type, q.options.len())
                children=move |(index, question)| {
                    view! { <QuestionRow index=index question=question sort=sort /> }
                }
            />
        </div>
    }
}

/// One draggable question row
#[component]
fn QuestionRow(index: usize, question: Question, sort: SortSignals) -> impl IntoView {
    let store = use_builder_store();
    let id = question.id.clone();
    let question_type = question.question_type;
    let has_options = question_type.has_options();

    let on_mousedown = make_on_mousedown(sort, QUESTION_SCOPE.to_string(), id.clone());

    let row_class = {
        let id = id.clone();
        move || {
            let mut c = String::from("question-row");
            if sort
                .dragging_read
                .get()
                .is_some_and(|d| d.scope == QUESTION_SCOPE && d.id == id)
            {
                c.push_str(" dragging");
            }
            if sort
                .over_read
                .get()
                .is_some_and(|d| d.scope == QUESTION_SCOPE && d.id == id)
            {
                c.push_str(" drop-target");
            }
            c
        }
    };

    let text_id = id.clone();
    let on_text_input = move |ev: web_sys::Event| {
        store_update_question_text(&store, &text_id, &event_target_value(&ev));
    };
    let type_id = id.clone();
    let on_type_change = move |ev: web_sys::Event| {
        store_update_question_type(
            &store,
            &type_id,
            QuestionType::from_value(&event_target_value(&ev)),
        );
    };
    let remove_id = id.clone();
    let on_remove = move |_| store_remove_question(&store, &remove_id);
    let add_id = id.clone();
    let on_add_option = move |_| store_add_option(&store, &add_id);

    view! {
        <div
            class=row_class
            data-sort-scope=QUESTION_SCOPE
            data-sort-id=id.clone()
            on:mousedown=on_mousedown
        >
            <span class="drag-handle" title="Drag">"☰"</span>
            <label class="question-label">{format!("{}. Question:", index + 1)}</label>
            <div class="question-main">
                <input
                    type="text"
                    prop:value=question.text.clone()
                    on:input=on_text_input
                />
                <select on:change=on_type_change>
                    <option value="text" selected=(question_type == QuestionType::Text)>
                        "Text"
                    </option>
                    <option value="single" selected=(question_type == QuestionType::Single)>
                        "Single choice"
                    </option>
                    <option value="multiple" selected=(question_type == QuestionType::Multiple)>
                        "Multiple choices"
                    </option>
                    <option value="image" selected=(question_type == QuestionType::Image)>
                        "Image Upload"
                    </option>
                </select>
                <button class="remove-btn" on:click=on_remove>"Remove"</button>
            </div>

            {has_options.then(|| {
                let each_id = id.clone();
                let child_id = id.clone();
                view! {
                    <div class="answers">
                        <p class="answers-title">"Answers"</p>
                        <For
                            each=move || {
                                store
                                    .questions()
                                    .get()
                                    .into_iter()
                                    .find(|q| q.id == each_id)
                                    .map(|q| q.options)
                                    .unwrap_or_default()
                                    .into_iter()
                                    .enumerate()
                                    .collect::<Vec<_>>()
                            }
                            key=|(idx, opt)| (*idx, opt.id.clone())
                            children=move |(idx, option)| {
                                view! {
                                    <OptionRow
                                        index=idx
                                        question_id=child_id.clone()
                                        option=option
                                        sort=sort
                                    />
                                }
                            }
                        />
                        <button class="add-answer-btn" on:click=on_add_option>"Add answer"</button>
                    </div>
                }
            })}
        </div>
    }
}

/// One draggable answer option row
#[component]
fn OptionRow(
    index: usize,
    question_id: String,
    option: AnswerOption,
    sort: SortSignals,
) -> impl IntoView {
    let store = use_builder_store();
    let scope = option_scope(&question_id);
    let option_id = option.id.clone();

    let on_mousedown = make_on_mousedown(sort, scope.clone(), option_id.clone());

    let row_class = {
        let scope = scope.clone();
        let option_id = option_id.clone();
        move || {
            let mut c = String::from("option-row");
            if sort
                .dragging_read
                .get()
                .is_some_and(|d| d.scope == scope && d.id == option_id)
            {
                c.push_str(" dragging");
            }
            if sort
                .over_read
                .get()
                .is_some_and(|d| d.scope == scope && d.id == option_id)
            {
                c.push_str(" drop-target");
            }
            c
        }
    };

    let text_ids = (question_id.clone(), option_id.clone());
    let on_text_input = move |ev: web_sys::Event| {
        store_update_option_text(&store, &text_ids.0, &text_ids.1, &event_target_value(&ev));
    };
    let remove_ids = (question_id.clone(), option_id.clone());
    let on_remove = move |_| store_remove_option(&store, &remove_ids.0, &remove_ids.1);

    view! {
        <div
            class=row_class
            data-sort-scope=scope.clone()
            data-sort-id=option_id.clone()
            on:mousedown=on_mousedown
        >
            <span class="drag-handle" title="Drag">"☰"</span>
            <span class="option-index">{format!("{}.", index + 1)}</span>
            <input
                type="text"
                prop:value=option.text.clone()
                on:input=on_text_input
            />
            <button class="remove-btn" on:click=on_remove>"Remove"</button>
        </div>
    }
}
