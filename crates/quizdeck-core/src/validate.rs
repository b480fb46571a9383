//! Question-bank validation.
//!
//! Normalization is total, so structural problems surface here as warnings
//! instead of load errors. The `validate` CLI command and the debug view
//! both consume these.

use crate::model::Question;

/// A warning from question validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Position of the question in the file (zero-based).
    pub index: usize,
    /// The question ID (if it has one).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn new(index: usize, q: &Question, message: impl Into<String>) -> Self {
        Self {
            index,
            question_id: (!q.id.is_empty()).then(|| q.id.clone()),
            message: message.into(),
        }
    }
}

/// Validate normalized questions for common issues.
pub fn validate_questions(questions: &[Question]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for (idx, q) in questions.iter().enumerate() {
        if q.stem.is_empty() {
            warnings.push(ValidationWarning::new(idx, q, "stem is empty"));
        }

        if q.choices.is_empty() {
            warnings.push(ValidationWarning::new(idx, q, "question has no choices"));
        }

        let mut seen_ids = std::collections::HashSet::new();
        for choice in &q.choices {
            if !seen_ids.insert(&choice.id) {
                warnings.push(ValidationWarning::new(
                    idx,
                    q,
                    format!("duplicate choice id: {}", choice.id),
                ));
            }
        }

        match &q.correct {
            Some(correct) if !q.choices.iter().any(|c| &c.id == correct) => {
                warnings.push(ValidationWarning::new(
                    idx,
                    q,
                    format!("correct answer '{correct}' matches no choice id"),
                ));
            }
            Some(_) => {}
            None if !q.choices.is_empty() => {
                warnings.push(ValidationWarning::new(idx, q, "no correct answer recorded"));
            }
            None => {}
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Choice;

    fn question(id: &str, stem: &str, choice_ids: &[&str], correct: Option<&str>) -> Question {
        Question {
            id: id.to_string(),
            title: String::new(),
            stem: stem.to_string(),
            choices: choice_ids
                .iter()
                .map(|c| Choice {
                    id: c.to_string(),
                    text: format!("choice {c}"),
                })
                .collect(),
            correct: correct.map(String::from),
            correct_label: None,
            feedback: Default::default(),
        }
    }

    #[test]
    fn clean_question_produces_no_warnings() {
        let qs = [question("q1", "stem", &["a", "b"], Some("a"))];
        assert!(validate_questions(&qs).is_empty());
    }

    #[test]
    fn empty_stem_and_missing_choices_warn() {
        let qs = [question("q1", "", &[], None)];
        let warnings = validate_questions(&qs);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().any(|w| w.message.contains("stem")));
        assert!(warnings.iter().any(|w| w.message.contains("no choices")));
        assert_eq!(warnings[0].question_id.as_deref(), Some("q1"));
    }

    #[test]
    fn duplicate_choice_ids_warn() {
        let qs = [question("q1", "stem", &["a", "a", "b"], Some("b"))];
        let warnings = validate_questions(&qs);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("duplicate choice id: a"));
    }

    #[test]
    fn unmatched_correct_warns() {
        let qs = [question("q1", "stem", &["a", "b"], Some("zzz"))];
        let warnings = validate_questions(&qs);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("matches no choice id"));
    }

    #[test]
    fn missing_correct_warns_only_with_choices() {
        let with_choices = [question("q1", "stem", &["a"], None)];
        assert_eq!(validate_questions(&with_choices).len(), 1);

        // A choice-less question already warns about its choices; a missing
        // answer adds nothing there.
        let warnings = validate_questions(&[question("q2", "stem", &[], None)]);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("no choices"));
    }

    #[test]
    fn index_points_at_the_offending_question() {
        let qs = [
            question("q1", "stem", &["a"], Some("a")),
            question("q2", "", &["a"], Some("a")),
        ];
        let warnings = validate_questions(&qs);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].index, 1);
    }
}
