//! Builder Page State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The sequence
//! operations themselves live in [`crate::editor`]; the helpers here apply
//! them to the store the builder components share.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::editor;
use crate::models::{Question, QuestionType};

/// Builder page state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct BuilderState {
    /// Quiz name input
    pub quiz_name: String,
    /// Quiz description input
    pub description: String,
    /// Ordered, reorderable question list
    pub questions: Vec<Question>,
    /// Validation/save error line (empty = no error)
    pub error_message: String,
}

/// Type alias for the store
pub type BuilderStore = Store<BuilderState>;

/// Get the builder store from context
pub fn use_builder_store() -> BuilderStore {
    expect_context::<BuilderStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_add_question(store: &BuilderStore) {
    editor::add_question(&mut store.questions().write());
}

pub fn store_remove_question(store: &BuilderStore, id: &str) {
    editor::remove_question(&mut store.questions().write(), id);
}

pub fn store_move_question(store: &BuilderStore, from_id: &str, to_id: &str) {
    editor::move_question(&mut store.questions().write(), from_id, to_id);
}

pub fn store_update_question_text(store: &BuilderStore, id: &str, text: &str) {
    editor::update_question_text(&mut store.questions().write(), id, text);
}

pub fn store_update_question_type(store: &BuilderStore, id: &str, new_type: QuestionType) {
    editor::update_question_type(&mut store.questions().write(), id, new_type);
}

pub fn store_add_option(store: &BuilderStore, question_id: &str) {
    editor::add_option(&mut store.questions().write(), question_id);
}

pub fn store_remove_option(store: &BuilderStore, question_id: &str, option_id: &str) {
    editor::remove_option(&mut store.questions().write(), question_id, option_id);
}

pub fn store_move_option(store: &BuilderStore, question_id: &str, from_id: &str, to_id: &str) {
    editor::move_option(&mut store.questions().write(), question_id, from_id, to_id);
}

pub fn store_update_option_text(
    store: &BuilderStore,
    question_id: &str,
    option_id: &str,
    text: &str,
) {
    editor::update_option_text(&mut store.questions().write(), question_id, option_id, text);
}
