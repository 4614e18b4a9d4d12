//! Quiz Attempt Page
//!
//! Loads a questionnaire, resumes a locally saved draft if one exists,
//! tracks elapsed time from the attempt's start anchor, and submits the
//! answers as multipart form data. Every answer change is written straight
//! back to the draft store; a successful submit clears it.

use std::collections::HashMap;

use gloo_timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api;
use crate::components::BackButton;
use crate::draft::{self, draft_key, BrowserDraftStore, DraftStore};
use crate::models::{Answer, AnswerEntry, QuestionType, QuestionnaireDetail, WireQuestion};

/// Answer edits flowing out of one question's inputs
#[derive(Clone)]
enum AnswerEvent {
    /// Text input or picked radio choice
    Set(String, String),
    /// Checkbox choice toggled in/out of the selection
    Toggle(String, String),
    /// Image file picked; only the name reaches the answer map
    File(String, String),
}

/// Quiz-taking page for one questionnaire
#[component]
pub fn QuizPage(id: String) -> impl IntoView {
    let (quiz, set_quiz) = signal(None::<QuestionnaireDetail>);
    let (answers, set_answers) = signal(HashMap::<String, Answer>::new());
    // Binary handles stay out of the answer map; they are not serializable
    // and are lost on reload by design
    let (files, set_files) = signal_local(HashMap::<String, web_sys::File>::new());
    let (time_taken, set_time_taken) = signal(0u64);
    let (submitted, set_submitted) = signal(false);
    let (start_time, set_start_time) = signal(None::<f64>);

    let storage_key = draft_key(&id);

    // Load the quiz, then either resume the saved draft or start a fresh
    // attempt with blank answers and a new start anchor
    {
        let quiz_id = id.clone();
        let storage_key = storage_key.clone();
        Effect::new(move |_| {
            let quiz_id = quiz_id.clone();
            let storage_key = storage_key.clone();
            spawn_local(async move {
                match api::get_by_id(&quiz_id).await {
                    Ok(detail) => {
                        if let Some(saved) = BrowserDraftStore.load(&storage_key) {
                            set_answers.set(saved.saved_answers);
                            set_start_time.set(Some(saved.saved_start_time));
                        } else {
                            let initial = detail
                                .questions
                                .iter()
                                .map(|q| {
                                    let blank = match q.question_type {
                                        QuestionType::Multiple => Answer::Choices(Vec::new()),
                                        _ => Answer::Text(String::new()),
                                    };
                                    (q.id.clone(), blank)
                                })
                                .collect();
                            set_answers.set(initial);
                            set_start_time.set(Some(js_sys::Date::now()));
                        }
                        set_quiz.set(Some(detail));
                    }
                    Err(err) => {
                        web_sys::console::error_1(
                            &format!("[QUIZ] Error loading quiz: {}", err).into(),
                        );
                    }
                }
            });
        });
    }

    // 1-second elapsed clock; freezes the instant the attempt is submitted
    let interval_slot = StoredValue::new_local(None::<Interval>);
    let stop_timer = move || {
        interval_slot.update_value(|slot| {
            if let Some(handle) = slot.take() {
                handle.cancel();
            }
        });
    };
    Effect::new(move |_| {
        let anchor = start_time.get();
        let done = submitted.get();
        stop_timer();
        if done {
            return;
        }
        let Some(anchor) = anchor else { return };
        set_time_taken.set(draft::elapsed_secs(js_sys::Date::now(), anchor));
        let handle = Interval::new(1000, move || {
            set_time_taken.set(draft::elapsed_secs(js_sys::Date::now(), anchor));
        });
        interval_slot.set_value(Some(handle));
    });
    on_cleanup(stop_timer);

    // Apply one answer edit and persist the draft right away
    let on_change = {
        let storage_key = storage_key.clone();
        move |event: AnswerEvent| {
            set_answers.update(|answers| match event {
                AnswerEvent::Set(question_id, value) => {
                    answers.insert(question_id, Answer::Text(value));
                }
                AnswerEvent::File(question_id, name) => {
                    answers.insert(question_id, Answer::File { name });
                }
                AnswerEvent::Toggle(question_id, choice) => {
                    let entry = answers
                        .entry(question_id)
                        .or_insert_with(|| Answer::Choices(Vec::new()));
                    if let Answer::Choices(choices) = entry {
                        if let Some(pos) = choices.iter().position(|c| *c == choice) {
                            choices.remove(pos);
                        } else {
                            choices.push(choice);
                        }
                    } else {
                        *entry = Answer::Choices(vec![choice]);
                    }
                }
            });
            if let Some(anchor) = start_time.get_untracked() {
                answers.with_untracked(|answers| {
                    draft::save_progress(&BrowserDraftStore, &storage_key, answers, anchor);
                });
            }
        }
    };
    let on_change = Callback::new(on_change);

    let on_submit = {
        let quiz_id = id.clone();
        let storage_key = storage_key.clone();
        move |_| {
            let Ok(form) = web_sys::FormData::new() else { return };
            let mut formatted = Vec::new();
            answers.with_untracked(|answers| {
                for (question_id, answer) in answers {
                    match answer {
                        Answer::File { .. } => {
                            if let Some(file) =
                                files.with_untracked(|f| f.get(question_id).cloned())
                            {
                                let _ = form.append_with_blob(question_id, &file);
                            }
                            formatted.push(AnswerEntry {
                                question_id: question_id.clone(),
                                answer: Answer::Text("file".to_string()),
                            });
                        }
                        other => formatted.push(AnswerEntry {
                            question_id: question_id.clone(),
                            answer: other.clone(),
                        }),
                    }
                }
            });
            let Ok(entries) = serde_json::to_string(&formatted) else { return };
            let _ = form.append_with_str("answers", &entries);
            let _ = form.append_with_str("timeTaken", &time_taken.get_untracked().to_string());

            let quiz_id = quiz_id.clone();
            let storage_key = storage_key.clone();
            spawn_local(async move {
                match api::send_answers(&quiz_id, form).await {
                    Ok(()) => {
                        BrowserDraftStore.clear(&storage_key);
                        set_submitted.set(true);
                    }
                    Err(err) => {
                        web_sys::console::error_1(
                            &format!("[QUIZ] Error submitting quiz: {}", err).into(),
                        );
                    }
                }
            });
        }
    };

    view! {
        <BackButton />
        <div class="quiz-page">
            <Show
                when=move || quiz.get().is_some()
                fallback=|| view! { <p class="loading">"Loading..."</p> }
            >
                {move || {
                    quiz.get()
                        .map(|detail| {
                            view! {
                                <h2 class="quiz-title">{detail.name}</h2>
                                <p class="quiz-description">{detail.description}</p>
                            }
                        })
                }}

                <For
                    each=move || {
                        quiz.get()
                            .map(|d| d.questions.into_iter().enumerate().collect::<Vec<_>>())
                            .unwrap_or_default()
                    }
                    key=|(index, q)| (*index, q.id.clone())
                    children=move |(index, question)| {
                        view! {
                            <AttemptQuestion
                                index=index
                                question=question
                                answers=answers
                                files=files
                                set_files=set_files
                                submitted=submitted
                                on_change=on_change
                            />
                        }
                    }
                />

                <button
                    class="submit-btn"
                    disabled=move || submitted.get()
                    on:click=on_submit.clone()
                >
                    {move || if submitted.get() { "Submitted" } else { "Submit Answers" }}
                </button>

                {move || {
                    submitted.get().then(|| view! {
                        <p class="submitted-note">
                            {format!(
                                "Your answers have been submitted. Time taken: {} seconds.",
                                time_taken.get()
                            )}
                        </p>
                    })
                }}
            </Show>
        </div>
    }
}

/// One question of the attempt, rendered per its type
#[component]
fn AttemptQuestion(
    index: usize,
    question: WireQuestion,
    answers: ReadSignal<HashMap<String, Answer>>,
    files: ReadSignal<HashMap<String, web_sys::File>, LocalStorage>,
    set_files: WriteSignal<HashMap<String, web_sys::File>, LocalStorage>,
    submitted: ReadSignal<bool>,
    on_change: Callback<AnswerEvent>,
) -> impl IntoView {
    let question_id = question.id.clone();
    let disabled = move || submitted.get();

    let body = match question.question_type {
        QuestionType::Text => {
            let value = {
                let question_id = question_id.clone();
                move || {
                    answers.with(|a| match a.get(&question_id) {
                        Some(Answer::Text(v)) => v.clone(),
                        _ => String::new(),
                    })
                }
            };
            let input_id = question_id.clone();
            view! {
                <input
                    type="text"
                    prop:value=value
                    disabled=disabled
                    on:input=move |ev| {
                        on_change.run(AnswerEvent::Set(input_id.clone(), event_target_value(&ev)));
                    }
                />
            }
            .into_any()
        }
        QuestionType::Single => question
            .options
            .iter()
            .map(|option| {
                let option = option.clone();
                let checked = {
                    let question_id = question_id.clone();
                    let option = option.clone();
                    move || {
                        answers.with(|a| {
                            matches!(a.get(&question_id), Some(Answer::Text(v)) if *v == option)
                        })
                    }
                };
                let change_ids = (question_id.clone(), option.clone());
                view! {
                    <label class="choice">
                        <input
                            type="radio"
                            name=format!("question-{}", question_id)
                            prop:checked=checked
                            disabled=disabled
                            on:change=move |_| {
                                on_change.run(AnswerEvent::Set(
                                    change_ids.0.clone(),
                                    change_ids.1.clone(),
                                ));
                            }
                        />
                        {option.clone()}
                    </label>
                }
            })
            .collect_view()
            .into_any(),
        QuestionType::Multiple => question
            .options
            .iter()
            .map(|option| {
                let option = option.clone();
                let checked = {
                    let question_id = question_id.clone();
                    let option = option.clone();
                    move || {
                        answers.with(|a| {
                            matches!(
                                a.get(&question_id),
                                Some(Answer::Choices(list)) if list.contains(&option)
                            )
                        })
                    }
                };
                let change_ids = (question_id.clone(), option.clone());
                view! {
                    <label class="choice">
                        <input
                            type="checkbox"
                            prop:checked=checked
                            disabled=disabled
                            on:change=move |_| {
                                on_change.run(AnswerEvent::Toggle(
                                    change_ids.0.clone(),
                                    change_ids.1.clone(),
                                ));
                            }
                        />
                        {option.clone()}
                    </label>
                }
            })
            .collect_view()
            .into_any(),
        QuestionType::Image => {
            let file_id = question_id.clone();
            let on_file_change = move |ev: web_sys::Event| {
                let Some(target) = ev.target() else { return };
                let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() else {
                    return;
                };
                let Some(file) = input.files().and_then(|list| list.get(0)) else {
                    return;
                };
                set_files.update(|files| {
                    files.insert(file_id.clone(), file.clone());
                });
                on_change.run(AnswerEvent::File(file_id.clone(), file.name()));
            };
            let preview_id = question_id.clone();
            view! {
                <input
                    type="file"
                    accept="image/*"
                    disabled=disabled
                    on:change=on_file_change
                />
                {move || {
                    files
                        .with(|f| f.get(&preview_id).cloned())
                        .and_then(|file| web_sys::Url::create_object_url_with_blob(&file).ok())
                        .map(|url| view! { <img class="image-preview" src=url alt="Preview" /> })
                }}
            }
            .into_any()
        }
    };

    view! {
        <div class="attempt-question">
            <p class="attempt-question-title">{format!("{}. {}", index + 1, question.text)}</p>
            {body}
        </div>
    }
}
