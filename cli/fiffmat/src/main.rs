//! fiffmat — write and inspect FIFF named matrices from the command line.

mod commands;
mod description;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fiffmat", version, about = "FIFF named-matrix tool")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a matrix description (.toml or .json) as a named-matrix block
    Write {
        /// Matrix description file
        input: PathBuf,
        /// Output .fif file
        #[arg(short, long)]
        output: PathBuf,
        /// Tag kind for the matrix payload (default: from the description)
        #[arg(long)]
        kind: Option<i32>,
    },
    /// Encode a description, read it back, and print a summary
    Show {
        /// Matrix description file
        input: PathBuf,
        /// Transpose the matrix after reading
        #[arg(long)]
        transpose: bool,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Write {
            input,
            output,
            kind,
        } => commands::write::run(&input, &output, kind),

        Commands::Show {
            input,
            transpose,
            json,
        } => commands::show::run(&input, transpose, json),
    }
}
