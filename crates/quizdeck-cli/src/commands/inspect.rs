//! The `quizdeck inspect` command.

use std::path::PathBuf;

use anyhow::Result;

use quizdeck_core::loader::load_questions_from_file;
use quizdeck_core::model::{Question, NEUTRAL_FEEDBACK_KEY};
use quizdeck_core::text::{strip_tags, truncate_chars};

pub fn execute(file: PathBuf, index: Option<usize>, raw: bool) -> Result<()> {
    let (questions, _) = load_questions_from_file(&file)?;

    let selected: Vec<(usize, &Question)> = match index {
        Some(i) => match questions.get(i) {
            Some(q) => vec![(i, q)],
            None => anyhow::bail!(
                "index {i} out of range, file has {} question(s)",
                questions.len()
            ),
        },
        None => questions.iter().enumerate().collect(),
    };

    if raw {
        let dump: Vec<&Question> = selected.iter().map(|(_, q)| *q).collect();
        println!("{}", serde_json::to_string_pretty(&dump)?);
        return Ok(());
    }

    println!(
        "{}: {} question(s)",
        file.file_name().and_then(|n| n.to_str()).unwrap_or("<file>"),
        questions.len()
    );

    for (i, q) in selected {
        println!("\n#{i}  {}", display_id(q));
        println!("  {}", truncate_chars(&strip_tags(&q.stem), 100));
        for (pos, choice) in q.choices.iter().enumerate() {
            let letter = (b'A' + (pos % 26) as u8) as char;
            let marker = if q.correct.as_deref() == Some(choice.id.as_str()) {
                "*"
            } else {
                " "
            };
            println!(
                "  {marker}{letter}. {}",
                truncate_chars(&strip_tags(&choice.text), 80)
            );
        }
        match (&q.correct, q.correct_label) {
            (Some(_), Some(label)) => println!("  correct: {label}"),
            (Some(id), None) => println!("  correct: {id} (matches no choice)"),
            (None, _) => println!("  correct: unknown"),
        }
        let mut keys: Vec<&str> = q.feedback.keys().map(String::as_str).collect();
        keys.sort_unstable();
        if keys != [NEUTRAL_FEEDBACK_KEY] || !q.feedback[NEUTRAL_FEEDBACK_KEY].is_empty() {
            println!("  feedback: {}", keys.join(", "));
        }
    }

    Ok(())
}

fn display_id(q: &Question) -> String {
    if !q.title.is_empty() {
        q.title.clone()
    } else if !q.id.is_empty() {
        q.id.clone()
    } else {
        "(untitled)".to_string()
    }
}
