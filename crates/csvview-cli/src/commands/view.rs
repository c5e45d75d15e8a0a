//! View command - print a CSV file as a table.

use std::path::PathBuf;

use colored::Colorize;
use csvview::input::delimiter_name;
use csvview::{FileStats, Table};

use crate::cli::LoadArgs;

/// Cells wider than this are cut with an ellipsis.
const MAX_CELL_WIDTH: usize = 30;

pub fn run(
    file: PathBuf,
    limit: usize,
    load: LoadArgs,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = super::load_file(&file, &load)?;

    print_summary(&result.stats);
    if verbose {
        println!(
            "  Delimiter: {}",
            delimiter_name(result.stats.delimiter as u8).white()
        );
    }
    println!();

    print_table(&result.table, limit);

    if result.table.row_count() > limit {
        println!();
        println!(
            "{} Showing {} of {} rows. Use {} to see more.",
            "Note:".yellow(),
            limit,
            result.table.row_count(),
            "--limit".cyan()
        );
    }

    Ok(())
}

fn print_summary(stats: &FileStats) {
    println!("{} {}", "File:".cyan().bold(), stats.file_name.white());
    println!(
        "  Rows: {}  Columns: {}  Size: {}  Encoding: {}",
        stats.total_rows.to_string().white().bold(),
        stats.column_count().to_string().white().bold(),
        stats.file_size.white(),
        stats.encoding.to_string().white()
    );
}

fn print_table(table: &Table, limit: usize) {
    let rows: Vec<Vec<String>> = table
        .records()
        .take(limit)
        .map(|r| r.into_iter().map(truncate).collect())
        .collect();

    let widths: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(truncate(h).chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header_line: Vec<String> = table
        .headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| pad(&truncate(h), *w))
        .collect();
    println!("{}", header_line.join(" | ").bold());

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    println!("{}", rule.join("-+-"));

    for row in &rows {
        let line: Vec<String> = row.iter().zip(&widths).map(|(c, w)| pad(c, *w)).collect();
        println!("{}", line.join(" | "));
    }
}

fn truncate(value: &str) -> String {
    if value.chars().count() <= MAX_CELL_WIDTH {
        value.to_string()
    } else {
        let cut: String = value.chars().take(MAX_CELL_WIDTH - 1).collect();
        format!("{}…", cut)
    }
}

/// Pad by character count; `format!` width would count bytes of colored strings.
fn pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    format!("{}{}", value, " ".repeat(width.saturating_sub(len)))
}
