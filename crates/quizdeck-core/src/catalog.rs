//! Data-folder scanning and menu ordering.

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::loader::count_questions;

/// Curriculum topic areas, each covering a contiguous module-number range.
pub const CATEGORIES: &[(&str, u32, u32)] = &[
    ("Quantitative Methods", 1, 11),
    ("Economics", 12, 19),
    ("Corporate Issuers", 20, 26),
    ("Financial Statement Analysis", 27, 38),
    ("Equity", 39, 46),
    ("Fixed Income", 47, 65),
    ("Derivatives", 66, 75),
    ("Alternative Investments", 76, 82),
    ("Portfolio Management", 83, 88),
    ("Ethical and Professional Standards", 89, 93),
];

/// One scanned question file.
#[derive(Debug, Clone, Serialize)]
pub struct QuizFile {
    /// On-disk filename, used in links.
    pub name: String,
    /// Filename without the `.json` extension.
    pub display_name: String,
    pub size_bytes: u64,
    pub questions: usize,
    /// Mock exams get the auto-finish player behavior.
    pub is_mock: bool,
    pub is_module: bool,
}

impl QuizFile {
    pub fn size_display(&self) -> String {
        format!("{:.1} KB", self.size_bytes as f64 / 1024.0)
    }

    pub fn module_number(&self) -> u32 {
        module_number(&self.name)
    }

    pub fn category(&self) -> Option<&'static str> {
        category_for(self.module_number())
    }
}

/// Extract `N` from a filename like `Module 12 Currency Exchange.json`.
/// Files without a module number sort as zero.
pub fn module_number(name: &str) -> u32 {
    let Some(pos) = name.find("Module") else {
        return 0;
    };
    let rest = name[pos + "Module".len()..].trim_start();
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// The topic area covering a module number, if any.
pub fn category_for(module_num: u32) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|(_, start, end)| (*start..=*end).contains(&module_num))
        .map(|(name, _, _)| *name)
}

fn category_rank(module_num: u32) -> usize {
    CATEGORIES
        .iter()
        .position(|(_, start, end)| (*start..=*end).contains(&module_num))
        .unwrap_or(CATEGORIES.len())
}

/// Menu sort orders, selected by query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Id,
    Alphabetical,
    ReverseAlphabetical,
    Category,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Id => "id",
            SortOrder::Alphabetical => "alphabetical",
            SortOrder::ReverseAlphabetical => "reverse_alphabetical",
            SortOrder::Category => "category",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ();

    /// Unknown values fall back to the default ordering so that a stale
    /// query parameter never breaks the menu.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "alphabetical" => SortOrder::Alphabetical,
            "reverse_alphabetical" => SortOrder::ReverseAlphabetical,
            "category" => SortOrder::Category,
            _ => SortOrder::Id,
        })
    }
}

/// Scan a data directory for question files.
///
/// Only `*.json` entries are listed. Question counts come from a full
/// normalization pass per file; unreadable files count zero questions and
/// stay in the listing.
pub fn scan_data_dir(dir: &Path) -> Result<Vec<QuizFile>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read data directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.to_ascii_lowercase().ends_with(".json") || !path.is_file() {
            continue;
        }

        let size_bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);
        files.push(QuizFile {
            name: name.to_string(),
            display_name: name
                .strip_suffix(".json")
                .or_else(|| name.strip_suffix(".JSON"))
                .unwrap_or(name)
                .to_string(),
            size_bytes,
            questions: count_questions(&path),
            is_mock: name.contains("Mock"),
            is_module: name.starts_with("Module"),
        });
    }

    Ok(files)
}

/// Order files for the menu: mock exams first, then modules in the
/// selected order, then everything else in scan order.
pub fn sort_files(files: Vec<QuizFile>, order: SortOrder) -> Vec<QuizFile> {
    let mut mocks = Vec::new();
    let mut modules = Vec::new();
    let mut others = Vec::new();
    for f in files {
        if f.is_mock {
            mocks.push(f);
        } else if f.is_module {
            modules.push(f);
        } else {
            others.push(f);
        }
    }

    match order {
        SortOrder::Id => modules.sort_by_key(QuizFile::module_number),
        SortOrder::Alphabetical => {
            modules.sort_by_key(|f| f.display_name.to_lowercase());
        }
        SortOrder::ReverseAlphabetical => {
            modules.sort_by_key(|f| std::cmp::Reverse(f.display_name.to_lowercase()));
        }
        SortOrder::Category => {
            modules.sort_by_key(|f| (category_rank(f.module_number()), f.module_number()));
        }
    }

    mocks.extend(modules);
    mocks.extend(others);
    mocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz_file(name: &str) -> QuizFile {
        QuizFile {
            name: name.to_string(),
            display_name: name.trim_end_matches(".json").to_string(),
            size_bytes: 1024,
            questions: 1,
            is_mock: name.contains("Mock"),
            is_module: name.starts_with("Module"),
        }
    }

    #[test]
    fn module_number_extraction() {
        assert_eq!(module_number("Module 12 Currency Exchange.json"), 12);
        assert_eq!(module_number("Module 5.json"), 5);
        assert_eq!(module_number("Mock Exam A.json"), 0);
        assert_eq!(module_number("Module next.json"), 0);
    }

    #[test]
    fn category_ranges() {
        assert_eq!(category_for(1), Some("Quantitative Methods"));
        assert_eq!(category_for(65), Some("Fixed Income"));
        assert_eq!(category_for(93), Some("Ethical and Professional Standards"));
        assert_eq!(category_for(0), None);
        assert_eq!(category_for(94), None);
    }

    #[test]
    fn mocks_come_first_in_every_order() {
        let files = vec![
            quiz_file("Module 2 B.json"),
            quiz_file("Mock Exam 1.json"),
            quiz_file("Module 1 A.json"),
        ];
        for order in [
            SortOrder::Id,
            SortOrder::Alphabetical,
            SortOrder::ReverseAlphabetical,
            SortOrder::Category,
        ] {
            let sorted = sort_files(files.clone(), order);
            assert!(sorted[0].is_mock, "order {order:?}");
        }
    }

    #[test]
    fn id_order_sorts_by_module_number() {
        let files = vec![
            quiz_file("Module 10 J.json"),
            quiz_file("Module 2 B.json"),
            quiz_file("Module 1 A.json"),
        ];
        let sorted = sort_files(files, SortOrder::Id);
        let numbers: Vec<_> = sorted.iter().map(QuizFile::module_number).collect();
        assert_eq!(numbers, [1, 2, 10]);
    }

    #[test]
    fn category_order_groups_by_topic_area() {
        let files = vec![
            quiz_file("Module 90 Ethics.json"),
            quiz_file("Module 12 Econ.json"),
            quiz_file("Module 3 Quant.json"),
        ];
        let sorted = sort_files(files, SortOrder::Category);
        let numbers: Vec<_> = sorted.iter().map(QuizFile::module_number).collect();
        assert_eq!(numbers, [3, 12, 90]);
    }

    #[test]
    fn non_module_files_are_kept_at_the_end() {
        let files = vec![
            quiz_file("notes.json"),
            quiz_file("Module 1 A.json"),
            quiz_file("Mock Exam.json"),
        ];
        let sorted = sort_files(files, SortOrder::Id);
        let names: Vec<_> = sorted.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Mock Exam.json", "Module 1 A.json", "notes.json"]);
    }

    #[test]
    fn unknown_sort_string_falls_back_to_id() {
        assert_eq!("category".parse(), Ok(SortOrder::Category));
        assert_eq!("whatever".parse(), Ok(SortOrder::Id));
    }

    #[test]
    fn scan_lists_json_files_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("Module 1 A.json"),
            r#"{"items": [{"stem": "q"}]}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("readme.txt"), "ignore me").unwrap();

        let files = scan_data_dir(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].display_name, "Module 1 A");
        assert_eq!(files[0].questions, 1);
        assert!(files[0].is_module);
        assert!(!files[0].is_mock);
    }
}
