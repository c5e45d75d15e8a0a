//! Export command - write the cleaned table to CSV, TSV or JSON.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use chrono::Utc;
use colored::Colorize;
use csvview::export::write_table;
use csvview::{export_file_name, OutputFormat};
use tracing::info;

use crate::cli::LoadArgs;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    format: OutputFormat,
    load: LoadArgs,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = super::load_file(&file, &load)?;

    let output_path = output.unwrap_or_else(|| {
        let name = export_file_name(
            Some(&result.stats.file_name),
            format.extension(),
            Utc::now(),
        );
        file.with_file_name(name)
    });

    if output_path == file {
        return Err(format!(
            "Refusing to overwrite the input file: {}",
            file.display()
        )
        .into());
    }

    let mut writer = BufWriter::new(File::create(&output_path)?);
    write_table(&result.table, format, &mut writer)?;
    writer.flush()?;

    info!(
        rows = result.table.row_count(),
        %format,
        "exported {}",
        output_path.display()
    );

    println!(
        "{} {} rows to {}",
        "Exported".green().bold(),
        result.table.row_count(),
        output_path.display().to_string().white()
    );
    if verbose {
        println!(
            "  Source encoding: {}  Columns: {}",
            result.encoding,
            result.table.column_count()
        );
    }

    Ok(())
}
