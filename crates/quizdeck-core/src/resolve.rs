//! Shape resolution: locate the question records inside an arbitrary JSON
//! document.
//!
//! Source files come in several wrapper conventions. Each convention is a
//! named strategy; strategies are tried in fixed priority order and the
//! first match wins. There is no failure path: a document matching no
//! strategy is treated as a single record.

use serde_json::Value;

/// A resolution strategy: given the whole document, maybe produce the
/// record list.
type Strategy = for<'a> fn(&'a Value) -> Option<&'a [Value]>;

/// Explicit `"items"` conventions beat heuristic scanning, which beats the
/// degenerate single-record fallback.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("top-level items", top_level_items),
    ("quiz-wrapped items", quiz_wrapped_items),
    ("bare sequence", bare_sequence),
    ("first record sequence", first_record_sequence),
];

/// A document that is a map with a top-level `"items"` array.
fn top_level_items(raw: &Value) -> Option<&[Value]> {
    raw.get("items")?.as_array().map(Vec::as_slice)
}

/// A document that nests the array under `"quiz"` → `"items"`.
fn quiz_wrapped_items(raw: &Value) -> Option<&[Value]> {
    raw.get("quiz")?
        .as_object()?
        .get("items")?
        .as_array()
        .map(Vec::as_slice)
}

/// A document that is itself the record array.
fn bare_sequence(raw: &Value) -> Option<&[Value]> {
    raw.as_array().map(Vec::as_slice)
}

/// Heuristic: the first map value (in insertion order) that is a non-empty
/// array whose first element is an object.
fn first_record_sequence(raw: &Value) -> Option<&[Value]> {
    raw.as_object()?.values().find_map(|v| {
        let arr = v.as_array()?;
        if !arr.is_empty() && arr[0].is_object() {
            Some(arr.as_slice())
        } else {
            None
        }
    })
}

/// Locate the question-like records in a parsed document.
///
/// Total over all JSON values: when nothing matches, the whole document is
/// treated as one record.
pub fn resolve_items(raw: &Value) -> Vec<&Value> {
    for (name, strategy) in STRATEGIES {
        if let Some(items) = strategy(raw) {
            tracing::debug!(strategy = name, count = items.len(), "resolved items");
            return items.iter().collect();
        }
    }
    vec![raw]
}
