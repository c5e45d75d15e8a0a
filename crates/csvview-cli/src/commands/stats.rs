//! Stats command - show the summary of a loaded file.

use std::path::PathBuf;

use colored::Colorize;
use csvview::input::delimiter_name;

use crate::cli::LoadArgs;

pub fn run(
    file: PathBuf,
    json_output: bool,
    load: LoadArgs,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = super::load_file(&file, &load)?;
    let stats = &result.stats;

    if json_output {
        println!("{}", serde_json::to_string_pretty(stats)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Statistics for".cyan().bold(),
        stats.file_name.white()
    );
    println!();
    println!("  Total rows: {}", stats.total_rows.to_string().white().bold());
    println!("  Columns:    {}", stats.column_count().to_string().white().bold());
    println!("  File size:  {}", stats.file_size.white());
    println!("  Encoding:   {}", stats.encoding.to_string().white());
    println!("  Delimiter:  {}", delimiter_name(stats.delimiter as u8).white());

    if verbose {
        println!();
        println!("{}", "Columns:".cyan().bold());
        for (i, column) in stats.columns.iter().enumerate() {
            println!("  {:>3}. {}", i + 1, column);
        }
        println!();
        println!("  Loaded at: {}", stats.loaded_at.to_rfc3339());
    }

    Ok(())
}
