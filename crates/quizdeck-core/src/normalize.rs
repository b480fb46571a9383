//! Field normalization: turn one resolved record into a [`Question`].
//!
//! Field names vary by export vintage. Each field reads from an ordered
//! alias table and takes the first usable value; every lookup degrades to
//! a default, so normalization is total and never errors.

use serde_json::Value;

use crate::model::{Choice, Question, NEUTRAL_FEEDBACK_KEY};
use crate::text::preserve_html;

/// Stem aliases, newest convention first.
const STEM_KEYS: &[&str] = &["itemBody", "stem", "question"];
/// Choice display-text aliases.
const CHOICE_TEXT_KEYS: &[&str] = &["itemBody", "text", "choiceText"];
/// Choice identifier aliases.
const CHOICE_ID_KEYS: &[&str] = &["id", "choiceId"];
/// Correct-answer aliases outside `scoringData`.
const CORRECT_KEYS: &[&str] = &["correct", "answer", "answerKey"];
/// Per-choice feedback maps, preferred source first.
const FEEDBACK_KEYS: &[&str] = &["answerFeedback", "feedback"];

/// Unwrap the payload object: some exports nest the real fields under an
/// `"entry"` key. Non-object records pass through; field lookups on them
/// simply find nothing.
pub fn unwrap_entry(record: &Value) -> &Value {
    match record.get("entry") {
        Some(entry) if entry.is_object() => entry,
        _ => record,
    }
}

/// First alias whose value is a non-empty string.
fn first_string<'a>(obj: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| obj.get(*k)?.as_str())
        .find(|s| !s.is_empty())
}

/// An identifier-like value as a string: non-empty strings pass through,
/// numbers are stringified, everything else is treated as absent.
fn id_value(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First alias whose value is identifier-like.
fn first_id(obj: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| id_value(obj.get(*k)?))
}

/// The choice array: `interactionData.choices` when it is a non-empty
/// array, else the entry's own `choices`.
fn choice_source(entry: &Value) -> &[Value] {
    if let Some(arr) = entry
        .get("interactionData")
        .and_then(|d| d.get("choices"))
        .and_then(Value::as_array)
    {
        if !arr.is_empty() {
            return arr;
        }
    }
    entry
        .get("choices")
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

fn normalize_choices(entry: &Value) -> Vec<Choice> {
    let mut choices = Vec::new();
    // The index tracks the source position, so elements skipped for being
    // the wrong type still advance it.
    for (idx, ch) in choice_source(entry).iter().enumerate() {
        match ch {
            Value::Object(_) => {
                let text = first_string(ch, CHOICE_TEXT_KEYS).unwrap_or("");
                choices.push(Choice {
                    id: first_id(ch, CHOICE_ID_KEYS).unwrap_or_else(|| idx.to_string()),
                    text: preserve_html(text),
                });
            }
            Value::String(s) => choices.push(Choice {
                id: idx.to_string(),
                text: preserve_html(s),
            }),
            _ => {}
        }
    }
    choices
}

/// The raw correct value: `scoringData.value` / `scoringData.id` first,
/// then the flat aliases.
fn raw_correct(entry: &Value) -> Option<String> {
    entry
        .get("scoringData")
        .and_then(|s| first_id(s, &["value", "id"]))
        .or_else(|| first_id(entry, CORRECT_KEYS))
}

/// Resolve the correct choice id and its display label.
///
/// A single-letter value is re-interpreted as a position into the choice
/// list when in range. The label is the letter of the matching choice's
/// position; a value matching no choice is kept as-is with no label.
fn resolve_correct(entry: &Value, choices: &[Choice]) -> (Option<String>, Option<char>) {
    let mut correct = match raw_correct(entry) {
        Some(v) => v,
        None => return (None, None),
    };

    if correct.chars().count() == 1 {
        let letter = correct.chars().next().unwrap();
        if letter.is_ascii_alphabetic() {
            let pos = (letter.to_ascii_uppercase() as usize) - ('A' as usize);
            if let Some(choice) = choices.get(pos) {
                correct = choice.id.clone();
            }
        }
    }

    let label = choices
        .iter()
        .position(|c| c.id == correct)
        .filter(|&pos| pos < 26)
        .map(|pos| (b'A' + pos as u8) as char);

    (Some(correct), label)
}

/// Feedback map. Non-map sources become a single `"neutral"` entry; a
/// record with no feedback at all still gets an empty neutral entry so
/// consumers can rely on the key being present.
fn normalize_feedback(entry: &Value) -> std::collections::HashMap<String, String> {
    let source = FEEDBACK_KEYS.iter().find_map(|k| {
        let v = entry.get(*k)?;
        match v {
            Value::Object(map) if !map.is_empty() => Some(v),
            Value::String(s) if !s.is_empty() => Some(v),
            _ => None,
        }
    });

    match source {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(k, v)| {
                let text = v.as_str().map(preserve_html).unwrap_or_default();
                (k.clone(), text)
            })
            .collect(),
        Some(Value::String(s)) => {
            std::iter::once((NEUTRAL_FEEDBACK_KEY.to_string(), preserve_html(s))).collect()
        }
        _ => std::iter::once((NEUTRAL_FEEDBACK_KEY.to_string(), String::new())).collect(),
    }
}

/// Normalize one resolved record into a canonical [`Question`].
pub fn normalize_record(record: &Value) -> Question {
    let entry = unwrap_entry(record);

    let choices = normalize_choices(entry);
    let (correct, correct_label) = resolve_correct(entry, &choices);

    Question {
        id: first_id(record, &["id"])
            .or_else(|| first_id(entry, &["id"]))
            .unwrap_or_default(),
        title: first_string(entry, &["title"]).unwrap_or("").to_string(),
        stem: preserve_html(first_string(entry, STEM_KEYS).unwrap_or("")),
        choices,
        correct,
        correct_label,
        feedback: normalize_feedback(entry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve_items;
    use serde_json::json;

    fn run_pipeline(doc: &Value) -> Vec<Question> {
        resolve_items(doc).into_iter().map(normalize_record).collect()
    }

    #[test]
    fn modern_record_with_entry_wrapper() {
        let record = json!({
            "id": "rec-1",
            "entry": {
                "title": "Ethics",
                "itemBody": "<p>What is 2 &amp; 2?</p>",
                "interactionData": {
                    "choices": [
                        {"id": "c1", "itemBody": "three"},
                        {"id": "c2", "itemBody": "four"}
                    ]
                },
                "scoringData": {"value": "c2"},
                "answerFeedback": {"c2": "correct &amp; tidy", "neutral": "see LOS 4"}
            }
        });
        let q = normalize_record(&record);
        assert_eq!(q.id, "rec-1");
        assert_eq!(q.title, "Ethics");
        assert_eq!(q.stem, "<p>What is 2 & 2?</p>");
        assert_eq!(q.choices.len(), 2);
        assert_eq!(q.choices[1].id, "c2");
        assert_eq!(q.correct.as_deref(), Some("c2"));
        assert_eq!(q.correct_label, Some('B'));
        assert_eq!(q.feedback_for("c2"), Some("correct & tidy"));
        assert_eq!(q.feedback_for("c1"), Some("see LOS 4"));
    }

    #[test]
    fn legacy_record_with_letter_answer() {
        let record = json!({
            "question": "Pick one",
            "choices": ["first", "second", "third"],
            "answer": "b"
        });
        let q = normalize_record(&record);
        assert_eq!(q.stem, "Pick one");
        let ids: Vec<_> = q.choices.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["0", "1", "2"]);
        assert_eq!(q.correct.as_deref(), Some("1"));
        assert_eq!(q.correct_label, Some('B'));
    }

    #[test]
    fn unmatched_correct_is_kept_without_label() {
        let record = json!({
            "stem": "s",
            "choices": [{"id": "x", "text": "a"}],
            "correct": "missing-id"
        });
        let q = normalize_record(&record);
        assert_eq!(q.correct.as_deref(), Some("missing-id"));
        assert_eq!(q.correct_label, None);
    }

    #[test]
    fn out_of_range_letter_is_kept_verbatim() {
        let record = json!({
            "stem": "s",
            "choices": [{"id": "only", "text": "a"}],
            "answer": "D"
        });
        let q = normalize_record(&record);
        assert_eq!(q.correct.as_deref(), Some("D"));
        assert_eq!(q.correct_label, None);
    }

    #[test]
    fn absent_feedback_yields_empty_neutral_entry() {
        let record = json!({"stem": "s", "choices": []});
        let q = normalize_record(&record);
        assert_eq!(q.feedback.len(), 1);
        assert_eq!(q.feedback[NEUTRAL_FEEDBACK_KEY], "");
        assert_eq!(q.correct, None);
        assert_eq!(q.correct_label, None);
    }

    #[test]
    fn string_feedback_becomes_neutral() {
        let record = json!({
            "stem": "s",
            "choices": ["a"],
            "feedback": "Remember the &lt;rule&gt;"
        });
        let q = normalize_record(&record);
        assert_eq!(q.feedback[NEUTRAL_FEEDBACK_KEY], "Remember the <rule>");
        assert!(!q.has_per_choice_feedback());
    }

    #[test]
    fn answer_feedback_preferred_over_feedback() {
        let record = json!({
            "stem": "s",
            "choices": [{"id": "a", "text": "t"}],
            "answerFeedback": {"a": "primary"},
            "feedback": {"a": "fallback"}
        });
        let q = normalize_record(&record);
        assert_eq!(q.feedback["a"], "primary");
    }

    #[test]
    fn skipped_choice_elements_still_advance_position() {
        let record = json!({
            "stem": "s",
            "choices": ["kept", 42, {"text": "also kept"}]
        });
        let q = normalize_record(&record);
        assert_eq!(q.choices.len(), 2);
        assert_eq!(q.choices[0].id, "0");
        // The object at source index 2 keeps that position as its id.
        assert_eq!(q.choices[1].id, "2");
    }

    #[test]
    fn numeric_ids_are_stringified() {
        let record = json!({
            "id": 7,
            "stem": "s",
            "choices": [{"id": 10, "text": "t"}],
            "correct": 10
        });
        let q = normalize_record(&record);
        assert_eq!(q.id, "7");
        assert_eq!(q.choices[0].id, "10");
        assert_eq!(q.correct.as_deref(), Some("10"));
        assert_eq!(q.correct_label, Some('A'));
    }

    #[test]
    fn empty_interaction_choices_fall_back() {
        let record = json!({
            "stem": "s",
            "interactionData": {"choices": []},
            "choices": [{"id": "a", "text": "kept"}]
        });
        let q = normalize_record(&record);
        assert_eq!(q.choices.len(), 1);
        assert_eq!(q.choices[0].id, "a");
    }

    #[test]
    fn present_but_empty_feedback_gets_the_neutral_entry() {
        for record in [
            json!({"stem": "s", "choices": ["a"], "feedback": {}}),
            json!({"stem": "s", "choices": ["a"], "feedback": ""}),
            json!({"stem": "s", "choices": ["a"], "answerFeedback": {}}),
        ] {
            let q = normalize_record(&record);
            assert_eq!(q.feedback.len(), 1, "{record}");
            assert_eq!(q.feedback[NEUTRAL_FEEDBACK_KEY], "");
        }
    }

    #[test]
    fn quiz_wrapped_literal_answer_text_stays_unmatched() {
        let doc = json!({"quiz": {"items": [{
            "stem": "Capital of France?",
            "choices": [{"id": "a", "text": "Paris"}, {"id": "b", "text": "London"}],
            "answer": "Paris"
        }]}});

        let questions = run_pipeline(&doc);
        assert_eq!(questions.len(), 1);
        let q = &questions[0];
        assert_eq!(q.stem, "Capital of France?");
        // Literal answer text is kept verbatim, not matched against choice
        // text, and earns no positional label.
        assert_eq!(q.correct.as_deref(), Some("Paris"));
        assert_eq!(q.correct_label, None);
    }

    #[test]
    fn normalizing_a_document_twice_gives_equal_results() {
        let doc = json!({"items": [
            {
                "id": "rec-1",
                "entry": {
                    "itemBody": "<p>Modern &amp; wrapped</p>",
                    "interactionData": {"choices": [
                        {"id": "c1", "itemBody": "one"},
                        {"id": "c2", "itemBody": "two"}
                    ]},
                    "scoringData": {"value": "c2"},
                    "answerFeedback": {"c2": "yes"}
                }
            },
            {"question": "Legacy", "choices": ["x", "y"], "answer": "B"},
            {"stem": "Sparse"},
            "not even an object"
        ]});

        let first = run_pipeline(&doc);
        let second = run_pipeline(&doc);
        assert_eq!(first.len(), 4);
        assert_eq!(first, second);
    }

    #[test]
    fn non_object_record_degrades_to_empty_question() {
        let q = normalize_record(&json!("just a string"));
        assert_eq!(q.id, "");
        assert_eq!(q.stem, "");
        assert!(q.choices.is_empty());
        assert_eq!(q.feedback[NEUTRAL_FEEDBACK_KEY], "");
    }
}
