//! Question Sequence Editing
//!
//! Pure operations over the builder's ordered question and option lists.
//! All operations are total: absent ids and self-moves are no-ops, and the
//! caller keeps ownership of the sequence.

use crate::models::{AnswerOption, Question, QuestionType};

/// Splice-based relocation: the moved element ends up in the slot the target
/// occupied, everything in between shifts by one.
fn array_move<T>(items: &mut Vec<T>, from_idx: usize, to_idx: usize) {
    let item = items.remove(from_idx);
    items.insert(to_idx, item);
}

fn question_index(questions: &[Question], id: &str) -> Option<usize> {
    questions.iter().position(|q| q.id == id)
}

fn option_index(options: &[AnswerOption], id: &str) -> Option<usize> {
    options.iter().position(|opt| opt.id == id)
}

/// Move the question `from_id` into the slot currently held by `to_id`.
pub fn move_question(questions: &mut Vec<Question>, from_id: &str, to_id: &str) {
    if from_id == to_id {
        return;
    }
    if let (Some(from), Some(to)) = (
        question_index(questions, from_id),
        question_index(questions, to_id),
    ) {
        array_move(questions, from, to);
    }
}

/// Move an option within one question. Other questions are never touched.
pub fn move_option(questions: &mut Vec<Question>, question_id: &str, from_id: &str, to_id: &str) {
    if from_id == to_id {
        return;
    }
    let Some(question) = questions.iter_mut().find(|q| q.id == question_id) else {
        return;
    };
    if let (Some(from), Some(to)) = (
        option_index(&question.options, from_id),
        option_index(&question.options, to_id),
    ) {
        array_move(&mut question.options, from, to);
    }
}

/// Append a blank question with a fresh id.
pub fn add_question(questions: &mut Vec<Question>) {
    questions.push(Question::new());
}

pub fn remove_question(questions: &mut Vec<Question>, id: &str) {
    questions.retain(|q| q.id != id);
}

pub fn update_question_text(questions: &mut Vec<Question>, id: &str, text: &str) {
    if let Some(question) = questions.iter_mut().find(|q| q.id == id) {
        question.text = text.to_string();
    }
}

/// Change a question's type. Leaving `single`/`multiple` clears the options.
pub fn update_question_type(questions: &mut Vec<Question>, id: &str, new_type: QuestionType) {
    if let Some(question) = questions.iter_mut().find(|q| q.id == id) {
        question.question_type = new_type;
        if !new_type.has_options() {
            question.options.clear();
        }
    }
}

/// Append a blank option to one question.
pub fn add_option(questions: &mut Vec<Question>, question_id: &str) {
    if let Some(question) = questions.iter_mut().find(|q| q.id == question_id) {
        question.options.push(AnswerOption::new());
    }
}

pub fn update_option_text(
    questions: &mut Vec<Question>,
    question_id: &str,
    option_id: &str,
    text: &str,
) {
    if let Some(question) = questions.iter_mut().find(|q| q.id == question_id) {
        if let Some(option) = question.options.iter_mut().find(|opt| opt.id == option_id) {
            option.text = text.to_string();
        }
    }
}

pub fn remove_option(questions: &mut Vec<Question>, question_id: &str, option_id: &str) {
    if let Some(question) = questions.iter_mut().find(|q| q.id == question_id) {
        question.options.retain(|opt| opt.id != option_id);
    }
}

/// Builder form validation. The first failing rule wins and its message is
/// returned verbatim for the error line under the save button.
pub fn validate(name: &str, description: &str, questions: &[Question]) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Quiz name shouldn't be empty.".to_string());
    }
    if description.trim().is_empty() {
        return Err("Quiz description shouldn't be empty.".to_string());
    }
    if questions.is_empty() {
        return Err("Quiz should contain at least 1 question.".to_string());
    }
    for question in questions {
        if question.text.trim().is_empty() {
            return Err("Every question should be named.".to_string());
        }
        if question.question_type.has_options() && question.options.len() < 2 {
            return Err(
                "Questions of type Single choice or Multiple choices should have at least 2 answers."
                    .to_string(),
            );
        }
        if question.options.iter().any(|opt| opt.text.trim().is_empty()) {
            return Err("Answers couldn't be empty.".to_string());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnswerOption;

    fn make_question(id: &str, text: &str) -> Question {
        Question {
            id: id.to_string(),
            text: text.to_string(),
            question_type: QuestionType::Text,
            options: Vec::new(),
        }
    }

    fn make_choice_question(id: &str, text: &str, options: &[(&str, &str)]) -> Question {
        Question {
            id: id.to_string(),
            text: text.to_string(),
            question_type: QuestionType::Single,
            options: options
                .iter()
                .map(|(oid, otext)| AnswerOption {
                    id: oid.to_string(),
                    text: otext.to_string(),
                })
                .collect(),
        }
    }

    fn ids(questions: &[Question]) -> Vec<&str> {
        questions.iter().map(|q| q.id.as_str()).collect()
    }

    #[test]
    fn test_move_question_forward_and_back() {
        let mut questions = vec![
            make_question("a", "A"),
            make_question("b", "B"),
            make_question("c", "C"),
            make_question("d", "D"),
        ];

        move_question(&mut questions, "a", "c");
        assert_eq!(ids(&questions), vec!["b", "c", "a", "d"]);

        move_question(&mut questions, "d", "b");
        assert_eq!(ids(&questions), vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn test_move_question_preserves_length_and_id_set() {
        let mut questions = vec![
            make_question("a", "A"),
            make_question("b", "B"),
            make_question("c", "C"),
        ];

        move_question(&mut questions, "c", "a");

        assert_eq!(questions.len(), 3);
        let mut sorted = ids(&questions);
        sorted.sort();
        assert_eq!(sorted, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_move_question_twice_with_swapped_args() {
        // Moving a onto b and then b onto a is a rotation, not an identity:
        // the element that was displaced stays displaced.
        let mut questions = vec![
            make_question("a", "A"),
            make_question("b", "B"),
            make_question("c", "C"),
        ];

        move_question(&mut questions, "a", "c");
        assert_eq!(ids(&questions), vec!["b", "c", "a"]);
        move_question(&mut questions, "c", "a");
        assert_eq!(ids(&questions), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_move_question_noop_cases() {
        let mut questions = vec![make_question("a", "A"), make_question("b", "B")];

        move_question(&mut questions, "a", "a");
        assert_eq!(ids(&questions), vec!["a", "b"]);

        move_question(&mut questions, "missing", "b");
        assert_eq!(ids(&questions), vec!["a", "b"]);

        move_question(&mut questions, "a", "missing");
        assert_eq!(ids(&questions), vec!["a", "b"]);
    }

    #[test]
    fn test_move_option_scoped_to_one_question() {
        let mut questions = vec![
            make_choice_question("q1", "Q1", &[("o1", "Red"), ("o2", "Blue"), ("o3", "Green")]),
            make_choice_question("q2", "Q2", &[("o4", "Yes"), ("o5", "No")]),
        ];

        move_option(&mut questions, "q1", "o3", "o1");

        let q1_texts: Vec<&str> = questions[0].options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(q1_texts, vec!["Green", "Red", "Blue"]);
        let q2_texts: Vec<&str> = questions[1].options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(q2_texts, vec!["Yes", "No"]);
    }

    #[test]
    fn test_update_question_type_clears_options() {
        let mut questions = vec![make_choice_question(
            "q1",
            "Q1",
            &[("o1", "Red"), ("o2", "Blue")],
        )];

        update_question_type(&mut questions, "q1", QuestionType::Text);
        assert!(questions[0].options.is_empty());

        // switching between choice types keeps the options
        let mut questions = vec![make_choice_question(
            "q1",
            "Q1",
            &[("o1", "Red"), ("o2", "Blue")],
        )];
        update_question_type(&mut questions, "q1", QuestionType::Multiple);
        assert_eq!(questions[0].options.len(), 2);

        update_question_type(&mut questions, "q1", QuestionType::Image);
        assert!(questions[0].options.is_empty());
    }

    #[test]
    fn test_add_and_remove_option() {
        let mut questions = vec![make_choice_question("q1", "Q1", &[("o1", "Red")])];

        add_option(&mut questions, "q1");
        assert_eq!(questions[0].options.len(), 2);

        remove_option(&mut questions, "q1", "o1");
        assert_eq!(questions[0].options.len(), 1);
        assert_ne!(questions[0].options[0].id, "o1");

        // absent ids are no-ops
        remove_option(&mut questions, "q1", "o1");
        add_option(&mut questions, "missing");
        assert_eq!(questions.len(), 1);
    }

    #[test]
    fn test_validate_first_failing_rule_wins() {
        let questions = vec![make_question("q1", "")];

        // blank name reported before the unnamed question
        let err = validate("", "desc", &questions).unwrap_err();
        assert_eq!(err, "Quiz name shouldn't be empty.");

        let err = validate("Colors", "  ", &questions).unwrap_err();
        assert_eq!(err, "Quiz description shouldn't be empty.");

        let err = validate("Colors", "pick one", &[]).unwrap_err();
        assert_eq!(err, "Quiz should contain at least 1 question.");

        let err = validate("Colors", "pick one", &questions).unwrap_err();
        assert_eq!(err, "Every question should be named.");
    }

    #[test]
    fn test_validate_choice_questions() {
        let questions = vec![make_choice_question("q1", "Favorite?", &[("o1", "Red")])];
        let err = validate("Colors", "pick one", &questions).unwrap_err();
        assert_eq!(
            err,
            "Questions of type Single choice or Multiple choices should have at least 2 answers."
        );

        let questions = vec![make_choice_question(
            "q1",
            "Favorite?",
            &[("o1", "Red"), ("o2", " ")],
        )];
        let err = validate("Colors", "pick one", &questions).unwrap_err();
        assert_eq!(err, "Answers couldn't be empty.");

        let questions = vec![make_choice_question(
            "q1",
            "Favorite?",
            &[("o1", "Red"), ("o2", "Blue")],
        )];
        assert!(validate("Colors", "pick one", &questions).is_ok());
    }
}
