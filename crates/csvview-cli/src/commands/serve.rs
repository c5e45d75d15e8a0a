//! Serve command - open the web viewer.

use colored::Colorize;

use crate::cli::LoadArgs;
use crate::server::{app, state::AppState};

pub fn run(
    port: u16,
    no_open: bool,
    max_upload_mb: usize,
    load: LoadArgs,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load.to_config()?;
    let state = AppState::new(config);

    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting viewer at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Upload limit: {} MB", max_upload_mb);
    if verbose {
        println!("  Delimiter: {}", describe(load.delimiter.as_deref()));
        println!(
            "  Encoding: {}",
            load.encoding
                .map(|e| e.to_string())
                .unwrap_or_else(|| "detect".to_string())
        );
    }
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    if !no_open {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(
        state,
        port,
        max_upload_mb.saturating_mul(1024 * 1024),
    ))?;

    println!("{}", "Stopped.".yellow());
    Ok(())
}

fn describe(delimiter: Option<&str>) -> &str {
    delimiter.unwrap_or("guess")
}
