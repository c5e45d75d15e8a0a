//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use csvview::input::parse_delimiter;
use csvview::{CsvViewError, EncodingLabel, OutputFormat, ViewerConfig};

/// csvview: encoding-aware CSV viewer
#[derive(Parser)]
#[command(name = "csvview")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a CSV file as a table
    View {
        /// Path to the CSV file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Maximum number of rows to print
        #[arg(short, long, default_value = "50")]
        limit: usize,

        #[command(flatten)]
        load: LoadArgs,
    },

    /// Show row count, columns, size and encoding
    Stats {
        /// Path to the CSV file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        load: LoadArgs,
    },

    /// Export the cleaned table
    Export {
        /// Path to the CSV file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (default: <file>_report.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,

        #[command(flatten)]
        load: LoadArgs,
    },

    /// Open the web viewer
    Serve {
        /// Port for web server
        #[arg(short, long, default_value = "3141")]
        port: u16,

        /// Don't automatically open browser
        #[arg(long)]
        no_open: bool,

        /// Largest accepted upload, in megabytes
        #[arg(long, default_value = "32")]
        max_upload_mb: usize,

        #[command(flatten)]
        load: LoadArgs,
    },
}

/// Options controlling how files are loaded.
#[derive(Args, Clone, Debug, Default)]
pub struct LoadArgs {
    /// Field delimiter (comma, tab, pipe, semicolon or a single character; default: guess)
    #[arg(short, long)]
    pub delimiter: Option<String>,

    /// Encoding (utf-8 or windows-1252; default: detect)
    #[arg(short, long)]
    pub encoding: Option<EncodingLabel>,

    /// Load files even when they are not named *.csv
    #[arg(long)]
    pub force: bool,
}

impl LoadArgs {
    /// Build the library configuration from the flags.
    pub fn to_config(&self) -> Result<ViewerConfig, CsvViewError> {
        let mut config = ViewerConfig {
            encoding: self.encoding,
            ..Default::default()
        };
        if let Some(ref d) = self.delimiter {
            config.normalizer.delimiter = Some(parse_delimiter(d)?);
        }
        Ok(config)
    }
}
