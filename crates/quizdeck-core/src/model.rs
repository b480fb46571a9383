//! Canonical question types.
//!
//! Every source file shape normalizes into these types; nothing downstream
//! (views, CLI, validation) ever sees the raw JSON variants.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Feedback key for a single explanation that applies regardless of which
/// choice was picked.
pub const NEUTRAL_FEEDBACK_KEY: &str = "neutral";

/// One selectable answer option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Stable identifier; falls back to the positional index as a string
    /// when the source record carries no explicit id.
    pub id: String,
    /// Display text. HTML markup is preserved (entities decoded, trimmed).
    pub text: String,
}

/// A normalized multiple-choice question.
///
/// Constructed fresh on every file load and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Record-level id, else entry-level id, else empty.
    pub id: String,
    /// Optional label; empty when absent.
    #[serde(default)]
    pub title: String,
    /// The question prompt. HTML markup (tables etc.) survives for
    /// rendering; only entities are decoded and whitespace trimmed.
    pub stem: String,
    /// Answer options in source order.
    pub choices: Vec<Choice>,
    /// Id of the correct choice, when the source encoded one that could be
    /// resolved. A value that matches no choice id is kept as-is.
    #[serde(default)]
    pub correct: Option<String>,
    /// Positional letter (A, B, C, …) of the choice whose id equals
    /// `correct`; absent when `correct` matches nothing.
    #[serde(default)]
    pub correct_label: Option<char>,
    /// Per-choice explanations keyed by choice id, or a single entry under
    /// [`NEUTRAL_FEEDBACK_KEY`].
    #[serde(default)]
    pub feedback: HashMap<String, String>,
}

impl Question {
    /// The explanation for a given choice id, falling back to the neutral
    /// explanation when no per-choice entry exists.
    pub fn feedback_for(&self, choice_id: &str) -> Option<&str> {
        self.feedback
            .get(choice_id)
            .or_else(|| self.feedback.get(NEUTRAL_FEEDBACK_KEY))
            .map(String::as_str)
    }

    /// Whether any feedback entry is specific to a choice (as opposed to a
    /// lone neutral explanation).
    pub fn has_per_choice_feedback(&self) -> bool {
        self.feedback.keys().any(|k| k != NEUTRAL_FEEDBACK_KEY)
    }
}
