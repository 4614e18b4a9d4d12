//! Attempt Draft Persistence
//!
//! localStorage-backed drafts keyed per questionnaire attempt, so a page
//! reload resumes the answers and the elapsed-time anchor. The store is an
//! injected trait: pages take any [`DraftStore`], tests use an in-memory one.

use std::collections::HashMap;

use crate::models::{Answer, QuizDraft};

/// Storage key for one attempt.
pub fn draft_key(questionnaire_id: &str) -> String {
    format!("quiz-{}-progress", questionnaire_id)
}

/// Key-value persistence for in-progress attempts.
pub trait DraftStore {
    fn load(&self, key: &str) -> Option<QuizDraft>;
    fn save(&self, key: &str, draft: &QuizDraft);
    fn clear(&self, key: &str);
}

/// `window.localStorage` implementation. No expiry, no versioning: an entry
/// that fails to parse is treated as absent and the attempt starts fresh.
#[derive(Clone, Copy)]
pub struct BrowserDraftStore;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

impl DraftStore for BrowserDraftStore {
    fn load(&self, key: &str) -> Option<QuizDraft> {
        let raw = local_storage()?.get_item(key).ok()??;
        serde_json::from_str(&raw).ok()
    }

    fn save(&self, key: &str, draft: &QuizDraft) {
        let Some(storage) = local_storage() else {
            return;
        };
        if let Ok(raw) = serde_json::to_string(draft) {
            let _ = storage.set_item(key, &raw);
        }
    }

    fn clear(&self, key: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Persist the current answer map. File answers are not serializable and are
/// dropped; if nothing survives the filter, nothing is written.
pub fn save_progress(
    store: &impl DraftStore,
    key: &str,
    answers: &HashMap<String, Answer>,
    start_time: f64,
) {
    let saved_answers: HashMap<String, Answer> = answers
        .iter()
        .filter(|(_, answer)| !answer.is_file())
        .map(|(id, answer)| (id.clone(), answer.clone()))
        .collect();
    if saved_answers.is_empty() {
        return;
    }
    store.save(
        key,
        &QuizDraft {
            saved_answers,
            saved_start_time: start_time,
        },
    );
}

/// Whole seconds since the attempt's start anchor.
pub fn elapsed_secs(now_ms: f64, start_ms: f64) -> u64 {
    if now_ms <= start_ms {
        0
    } else {
        ((now_ms - start_ms) / 1000.0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// In-memory stand-in that still exercises the serde round trip.
    struct MemoryDraftStore {
        entries: RefCell<HashMap<String, String>>,
    }

    impl MemoryDraftStore {
        fn new() -> Self {
            Self {
                entries: RefCell::new(HashMap::new()),
            }
        }

        fn len(&self) -> usize {
            self.entries.borrow().len()
        }
    }

    impl DraftStore for MemoryDraftStore {
        fn load(&self, key: &str) -> Option<QuizDraft> {
            let entries = self.entries.borrow();
            serde_json::from_str(entries.get(key)?).ok()
        }

        fn save(&self, key: &str, draft: &QuizDraft) {
            if let Ok(raw) = serde_json::to_string(draft) {
                self.entries.borrow_mut().insert(key.to_string(), raw);
            }
        }

        fn clear(&self, key: &str) {
            self.entries.borrow_mut().remove(key);
        }
    }

    fn sample_answers() -> HashMap<String, Answer> {
        let mut answers = HashMap::new();
        answers.insert("q1".to_string(), Answer::Text("hello".to_string()));
        answers.insert(
            "q2".to_string(),
            Answer::Choices(vec!["Red".to_string(), "Blue".to_string()]),
        );
        answers.insert(
            "q3".to_string(),
            Answer::File {
                name: "photo.png".to_string(),
            },
        );
        answers
    }

    #[test]
    fn test_key_pattern() {
        assert_eq!(draft_key("abc123"), "quiz-abc123-progress");
    }

    #[test]
    fn test_save_filters_file_answers() {
        let store = MemoryDraftStore::new();
        let key = draft_key("x");

        save_progress(&store, &key, &sample_answers(), 1000.0);

        let draft = store.load(&key).expect("draft saved");
        assert_eq!(draft.saved_start_time, 1000.0);
        assert_eq!(draft.saved_answers.len(), 2);
        assert_eq!(
            draft.saved_answers.get("q1"),
            Some(&Answer::Text("hello".to_string()))
        );
        assert_eq!(
            draft.saved_answers.get("q2"),
            Some(&Answer::Choices(vec![
                "Red".to_string(),
                "Blue".to_string()
            ]))
        );
        assert!(draft.saved_answers.get("q3").is_none());
    }

    #[test]
    fn test_save_skips_empty_after_filter() {
        let store = MemoryDraftStore::new();
        let key = draft_key("x");

        let mut answers = HashMap::new();
        answers.insert(
            "q1".to_string(),
            Answer::File {
                name: "photo.png".to_string(),
            },
        );
        save_progress(&store, &key, &answers, 1000.0);
        assert_eq!(store.len(), 0);

        save_progress(&store, &key, &HashMap::new(), 1000.0);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_clear_removes_entry() {
        let store = MemoryDraftStore::new();
        let key = draft_key("x");

        save_progress(&store, &key, &sample_answers(), 1000.0);
        assert_eq!(store.len(), 1);

        store.clear(&key);
        assert!(store.load(&key).is_none());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_elapsed_secs() {
        let start = 10_000.0;
        assert_eq!(elapsed_secs(start + 5000.0, start), 5);
        assert_eq!(elapsed_secs(start + 5999.0, start), 5);
        assert_eq!(elapsed_secs(start + 6000.0, start), 6);
        // a clock that moved backwards reads zero, not garbage
        assert_eq!(elapsed_secs(start - 100.0, start), 0);
    }
}
