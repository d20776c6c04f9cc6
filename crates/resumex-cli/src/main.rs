mod commands;
mod output;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "resumex",
    version,
    about = "Turn PDF résumés into structured profile data using layout heuristics"
)]
struct Cli {
    /// Log more detail (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a PDF résumé into experiences, education and skills
    Parse {
        /// Path to the PDF file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write parsed output to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Text extraction backend: content-stream (default) or pdftotext
        #[arg(short, long, default_value = "content-stream")]
        backend: String,

        /// Parser config file (JSON); defaults are used for missing fields
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print the intermediate record with dates as printed
        #[arg(long)]
        raw: bool,
    },
    /// Show how lines were grouped and assigned to sections
    Inspect {
        /// Path to the PDF file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Text extraction backend: content-stream (default) or pdftotext
        #[arg(short, long, default_value = "content-stream")]
        backend: String,

        /// Parser config file (JSON)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Show or validate parser configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Normalize date ranges as the parser would
    Dates {
        /// Ranges such as "Jan 2020 - Present"
        #[arg(required = true)]
        ranges: Vec<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the built-in default configuration as JSON
    Show,
    /// Validate a config file
    Validate {
        /// Path to JSON config file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Parse {
            input_file,
            output,
            out,
            backend,
            config,
            raw,
        } => commands::parse::run(input_file, &output, out, &backend, config, raw),
        Commands::Inspect {
            input_file,
            output,
            backend,
            config,
        } => commands::inspect::run(input_file, &output, &backend, config),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(),
            ConfigAction::Validate { file } => commands::config::validate(&file),
        },
        Commands::Dates { ranges, output } => commands::dates::run(&ranges, &output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}
