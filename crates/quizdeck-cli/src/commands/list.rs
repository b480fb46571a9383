//! The `quizdeck list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizdeck_core::catalog::{scan_data_dir, sort_files, SortOrder};

pub fn execute(dir: PathBuf, sort: String) -> Result<()> {
    let order: SortOrder = sort.parse().unwrap_or_default();
    let files = sort_files(scan_data_dir(&dir)?, order);

    if files.is_empty() {
        println!("No question files in {}.", dir.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Quiz", "Questions", "Size", "Kind", "Topic area"]);

    for file in &files {
        let kind = if file.is_mock {
            "mock"
        } else if file.is_module {
            "module"
        } else {
            "other"
        };
        table.add_row(vec![
            Cell::new(&file.display_name),
            Cell::new(file.questions),
            Cell::new(file.size_display()),
            Cell::new(kind),
            Cell::new(file.category().unwrap_or("-")),
        ]);
    }

    println!("{table}");
    println!(
        "{} file(s), {} mock exam(s), {} module(s)",
        files.len(),
        files.iter().filter(|f| f.is_mock).count(),
        files.iter().filter(|f| f.is_module).count(),
    );

    Ok(())
}
