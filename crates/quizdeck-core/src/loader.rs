//! Question-file loading and the directory allow-list.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::model::Question;
use crate::normalize::normalize_record;
use crate::resolve::resolve_items;

/// Load and normalize every question in a JSON file.
///
/// Returns the canonical questions together with the raw parsed document,
/// which the debug and preview surfaces render verbatim.
pub fn load_questions_from_file(path: &Path) -> Result<(Vec<Question>, Value)> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read question file {}", path.display()))?;
    let raw: Value = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse JSON in {}", path.display()))?;

    let questions = resolve_items(&raw).into_iter().map(normalize_record).collect();
    Ok((questions, raw))
}

/// Count the questions in a file, treating any failure as zero. Used by
/// catalog scans, where a broken file should not sink the whole listing.
pub fn count_questions(path: &Path) -> usize {
    match load_questions_from_file(path) {
        Ok((questions, _)) => questions.len(),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to count questions");
            0
        }
    }
}

/// Directories files may be served from.
///
/// Every request-supplied path is resolved against these roots and
/// rejected unless the result stays inside one of them. Checks are
/// lexical: `..` components are collapsed without touching the
/// filesystem, so symlinks behave like their link path.
#[derive(Debug, Clone)]
pub struct AllowedRoots {
    roots: Vec<PathBuf>,
}

impl AllowedRoots {
    pub fn new(roots: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            roots: roots.into_iter().map(|r| normalize_lexical(&r)).collect(),
        }
    }

    /// Whether an absolute path lies inside one of the allowed roots.
    pub fn is_allowed(&self, path: &Path) -> bool {
        let path = normalize_lexical(path);
        self.roots.iter().any(|root| path.starts_with(root))
    }

    /// Resolve a request-supplied name to an existing, allowed file.
    ///
    /// Absolute paths are taken as-is; relative names are tried against
    /// each root in order. The first candidate that exists and passes the
    /// allow-list wins.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let requested = Path::new(name);
        let candidates: Vec<PathBuf> = if requested.is_absolute() {
            vec![requested.to_path_buf()]
        } else {
            self.roots.iter().map(|root| root.join(requested)).collect()
        };

        candidates
            .into_iter()
            .find(|p| p.exists() && self.is_allowed(p))
    }
}

/// Collapse `.` and `..` components without consulting the filesystem.
fn normalize_lexical(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(Component::ParentDir);
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_and_normalizes_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "quiz.json",
            r#"{"items": [{"stem": "q1", "choices": ["a", "b"], "answer": "A"}]}"#,
        );

        let (questions, raw) = load_questions_from_file(&path).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct.as_deref(), Some("0"));
        assert!(raw.get("items").is_some());
    }

    #[test]
    fn read_and_parse_errors_carry_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = load_questions_from_file(&missing).unwrap_err();
        assert!(err.to_string().contains("nope.json"));

        let bad = write_file(dir.path(), "bad.json", "{not json");
        let err = load_questions_from_file(&bad).unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn count_degrades_to_zero_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write_file(dir.path(), "bad.json", "[");
        assert_eq!(count_questions(&bad), 0);
    }

    #[test]
    fn allow_list_rejects_outside_paths() {
        let dir = tempfile::tempdir().unwrap();
        let roots = AllowedRoots::new([dir.path().to_path_buf()]);

        assert!(roots.is_allowed(&dir.path().join("inner/file.json")));
        assert!(!roots.is_allowed(Path::new("/etc/passwd")));
    }

    #[test]
    fn traversal_escapes_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let roots = AllowedRoots::new([dir.path().join("data")]);

        let sneaky = dir.path().join("data/../outside.json");
        assert!(!roots.is_allowed(&sneaky));
        assert!(roots.resolve("../outside.json").is_none());
    }

    #[test]
    fn relative_names_try_roots_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("base");
        let data = dir.path().join("data");
        fs::create_dir_all(&base).unwrap();
        fs::create_dir_all(&data).unwrap();
        write_file(&data, "only-in-data.json", "{}");
        write_file(&base, "shared.json", "{}");
        write_file(&data, "shared.json", "{}");

        let roots = AllowedRoots::new([base.clone(), data.clone()]);
        assert_eq!(
            roots.resolve("only-in-data.json"),
            Some(data.join("only-in-data.json"))
        );
        // Earlier root wins when both have the file.
        assert_eq!(roots.resolve("shared.json"), Some(base.join("shared.json")));
        assert!(roots.resolve("absent.json").is_none());
    }

    #[test]
    fn absolute_names_must_be_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let inside = write_file(dir.path(), "in.json", "{}");
        let roots = AllowedRoots::new([dir.path().to_path_buf()]);

        assert_eq!(roots.resolve(inside.to_str().unwrap()), Some(inside));
        assert!(roots.resolve("/etc/hostname").is_none());
    }
}
