//! Frontend Models
//!
//! Data structures for the builder plus wire shapes of the questionnaire API.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_LOCAL_ID: AtomicU64 = AtomicU64::new(1);

/// Fresh client-side id, unique for the lifetime of the page.
/// Server-assigned ids pass through untouched and never collide with these.
pub fn next_local_id(prefix: &str) -> String {
    format!("{}-{}", prefix, NEXT_LOCAL_ID.fetch_add(1, Ordering::Relaxed))
}

/// Question kinds supported by the builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Text,
    Single,
    Multiple,
    Image,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Text => "text",
            QuestionType::Single => "single",
            QuestionType::Multiple => "multiple",
            QuestionType::Image => "image",
        }
    }

    /// Parse a `<select>` value; unknown values fall back to `Text`.
    pub fn from_value(value: &str) -> Self {
        match value {
            "single" => QuestionType::Single,
            "multiple" => QuestionType::Multiple,
            "image" => QuestionType::Image,
            _ => QuestionType::Text,
        }
    }

    /// Only choice questions carry an option list.
    pub fn has_options(&self) -> bool {
        matches!(self, QuestionType::Single | QuestionType::Multiple)
    }
}

/// Answer option owned by exactly one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
}

impl AnswerOption {
    pub fn new() -> Self {
        Self {
            id: next_local_id("o"),
            text: String::new(),
        }
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            id: next_local_id("o"),
            text: text.into(),
        }
    }
}

/// Editable question in the builder (id stable across reorders)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub question_type: QuestionType,
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn new() -> Self {
        Self {
            id: next_local_id("q"),
            text: String::new(),
            question_type: QuestionType::Text,
            options: Vec::new(),
        }
    }

    /// Wire form for POST/PUT bodies. Options flatten to their text; non-choice
    /// questions always serialize an empty option list.
    pub fn to_wire(&self) -> WireQuestion {
        let options = if self.question_type.has_options() {
            self.options.iter().map(|opt| opt.text.clone()).collect()
        } else {
            Vec::new()
        };
        WireQuestion {
            id: self.id.clone(),
            text: self.text.clone(),
            question_type: self.question_type,
            options,
        }
    }

    /// Rebuild an editable question from the wire form. Options arrive as plain
    /// strings, so each gets a fresh local id.
    pub fn from_wire(wire: WireQuestion) -> Self {
        Self {
            id: wire.id,
            text: wire.text,
            question_type: wire.question_type,
            options: wire.options.into_iter().map(AnswerOption::with_text).collect(),
        }
    }
}

/// Question as the API speaks it (options are bare strings)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireQuestion {
    #[serde(rename = "_id")]
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<String>,
}

/// Catalog listing entry (server-owned projection)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "questionsCount", default)]
    pub questions_count: u32,
    #[serde(default)]
    pub completions: u32,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
}

/// One page of the catalog listing
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaginatedResponse {
    pub questionnaires: Vec<QuestionnaireSummary>,
    pub total: u32,
}

/// Full questionnaire as returned by `GET /questionnaire/:id`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuestionnaireDetail {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub name: String,
    pub description: String,
    pub questions: Vec<WireQuestion>,
}

/// Create/update body for `POST`/`PUT /questionnaire`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionnairePayload {
    pub name: String,
    pub description: String,
    pub questions: Vec<WireQuestion>,
}

/// A respondent's answer to one question. The `File` variant only records the
/// picked file's name; the binary handle lives in the quiz page and is never
/// written to the draft store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Choices(Vec<String>),
    File { name: String },
}

impl Answer {
    pub fn is_file(&self) -> bool {
        matches!(self, Answer::File { .. })
    }
}

/// Submission entry, serialized into the multipart `answers` field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerEntry {
    #[serde(rename = "questionId")]
    pub question_id: String,
    pub answer: Answer,
}

/// Locally persisted attempt state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizDraft {
    #[serde(rename = "savedAnswers")]
    pub saved_answers: HashMap<String, Answer>,
    #[serde(rename = "savedStartTime")]
    pub saved_start_time: f64,
}

/// Aggregate statistics for one questionnaire
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Statistics {
    #[serde(rename = "avgTime")]
    pub avg_time: Option<f64>,
    #[serde(default)]
    pub completions: BTreeMap<String, u32>,
    #[serde(default)]
    pub piecharts: Vec<PieChart>,
}

/// Answer distribution for one question
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PieChart {
    pub question: String,
    #[serde(default)]
    pub data: Vec<PieSlice>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PieSlice {
    pub name: String,
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_ids_are_unique() {
        let a = next_local_id("q");
        let b = next_local_id("q");
        assert_ne!(a, b);
    }

    #[test]
    fn test_wire_round_trip_keeps_option_order() {
        let question = Question {
            id: "q-1".to_string(),
            text: "Favorite?".to_string(),
            question_type: QuestionType::Single,
            options: vec![
                AnswerOption::with_text("Red"),
                AnswerOption::with_text("Blue"),
            ],
        };

        let wire = question.to_wire();
        assert_eq!(wire.options, vec!["Red", "Blue"]);

        let reloaded = Question::from_wire(wire);
        let texts: Vec<&str> = reloaded.options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, vec!["Red", "Blue"]);
    }

    #[test]
    fn test_save_then_reload_shape_round_trip() {
        // the builder's save body, parsed back as the GET-by-id shape
        let payload = QuestionnairePayload {
            name: "Colors".to_string(),
            description: "pick one".to_string(),
            questions: vec![Question {
                id: "q-1".to_string(),
                text: "Favorite?".to_string(),
                question_type: QuestionType::Single,
                options: vec![
                    AnswerOption::with_text("Red"),
                    AnswerOption::with_text("Blue"),
                ],
            }
            .to_wire()],
        };

        let json = serde_json::to_string(&payload).unwrap();
        let detail: QuestionnaireDetail = serde_json::from_str(&json).unwrap();

        assert_eq!(detail.name, "Colors");
        assert_eq!(detail.description, "pick one");
        assert_eq!(detail.questions.len(), 1);
        assert_eq!(detail.questions[0].question_type, QuestionType::Single);
        assert_eq!(detail.questions[0].options, vec!["Red", "Blue"]);
    }

    #[test]
    fn test_non_choice_questions_serialize_empty_options() {
        let mut question = Question::new();
        question.options.push(AnswerOption::with_text("leftover"));
        question.question_type = QuestionType::Image;
        assert!(question.to_wire().options.is_empty());
    }

    #[test]
    fn test_draft_serde_uses_camel_case_keys() {
        let mut saved_answers = HashMap::new();
        saved_answers.insert("q-1".to_string(), Answer::Text("hi".to_string()));
        let draft = QuizDraft {
            saved_answers,
            saved_start_time: 123.0,
        };
        let json = serde_json::to_string(&draft).unwrap();
        assert!(json.contains("savedAnswers"));
        assert!(json.contains("savedStartTime"));

        let back: QuizDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(back, draft);
    }
}
