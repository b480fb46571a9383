//! The `quizdeck validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizdeck_core::loader::load_questions_from_file;
use quizdeck_core::validate::validate_questions;

pub fn execute(path: PathBuf) -> Result<()> {
    let files = if path.is_dir() {
        let mut files: Vec<PathBuf> = std::fs::read_dir(&path)
            .with_context(|| format!("failed to read directory {}", path.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("json"))
            })
            .collect();
        files.sort();
        files
    } else {
        vec![path]
    };

    let mut total_warnings = 0;

    for file in &files {
        let (questions, _) = load_questions_from_file(file)?;
        println!(
            "{}: {} question(s)",
            file.file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("<file>"),
            questions.len()
        );

        let warnings = validate_questions(&questions);
        for w in &warnings {
            let id = w.question_id.as_deref().unwrap_or("-");
            println!("  [#{} {}] WARNING: {}", w.index, id, w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All question files valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
