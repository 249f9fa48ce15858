mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "claimsheet",
    version,
    about = "Convert PDF claim statements into a fixed-layout spreadsheet"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PDF statement into an xlsx workbook, optionally storing rows in SQLite
    Convert {
        /// Path to the PDF statement
        input_file: PathBuf,

        /// Workbook path (default: output.xlsx, or output_filename from --config)
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// SQLite database to append rows to
        #[arg(long, value_name = "PATH")]
        db: Option<PathBuf>,

        /// Table to append rows to (default: pdf_data)
        #[arg(long, value_name = "NAME", requires = "db")]
        table: Option<String>,

        /// JSON options file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output format for the summary: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Show the records of a PDF statement (or an exported workbook) without writing anything
    Inspect {
        /// Path to a PDF statement or an xlsx workbook
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Print the fixed output columns
    Columns,
}

fn main() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("claimsheet=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input_file,
            out,
            db,
            table,
            config,
            output,
        } => commands::convert::run(input_file, out, db, table, config, &output),
        Commands::Inspect { input_file, output } => commands::inspect::run(input_file, &output),
        Commands::Columns => commands::columns::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
