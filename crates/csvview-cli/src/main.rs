//! csvview CLI - view, summarize and export CSV files.

mod cli;
mod commands;
mod server;
mod web;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, matches!(cli.command, Commands::Serve { .. }));

    let result = match cli.command {
        Commands::View { file, limit, load } => commands::view::run(file, limit, load, cli.verbose),

        Commands::Stats { file, json, load } => commands::stats::run(file, json, load, cli.verbose),

        Commands::Export {
            file,
            output,
            format,
            load,
        } => commands::export::run(file, output, format, load, cli.verbose),

        Commands::Serve {
            port,
            no_open,
            max_upload_mb,
            load,
        } => commands::serve::run(port, no_open, max_upload_mb, load, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Install the tracing subscriber. `RUST_LOG` overrides the defaults.
fn init_logging(verbose: bool, serving: bool) {
    let default = if verbose {
        "csvview=debug,tower_http=debug"
    } else if serving {
        "csvview=info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
