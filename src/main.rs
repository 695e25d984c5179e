//! Puntaje CLI
//!
//! Command-line interface for the translation evaluation pipeline: convert
//! parallel text files into a JSONL record store, then score the store with
//! BLEU and COMET and write reports.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use puntaje::pipeline::{run_convert, run_evaluate, EvaluateOptions};
use puntaje::score::{DEFAULT_COMET_COMMAND, DEFAULT_COMET_MODEL};

#[derive(Parser, Debug)]
#[command(name = "puntaje")]
#[command(author, version, about = "Machine translation quality evaluation (BLEU + COMET)")]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert parallel text files into a JSONL record store
    Convert {
        /// Source sentences file, one per line
        #[arg(long)]
        src: PathBuf,

        /// Machine translation hypothesis file, one per line
        #[arg(long)]
        hyp: PathBuf,

        /// Reference translation files, order-significant (repeatable)
        #[arg(long = "ref", required = true, num_args = 1..)]
        refs: Vec<PathBuf>,

        /// Path of the record store to create
        #[arg(long)]
        output: PathBuf,
    },

    /// Score a record store with BLEU and COMET and write reports
    Evaluate {
        /// JSONL record store with src, hyp and ref fields
        #[arg(long = "input_file")]
        input_file: PathBuf,

        /// Directory receiving the report files
        #[arg(long = "output_dir", default_value = "results")]
        output_dir: PathBuf,

        /// COMET model identifier to score with
        #[arg(long = "comet_model", default_value = DEFAULT_COMET_MODEL)]
        comet_model: String,

        /// Scoring backend command implementing the COMET stdin/stdout contract
        #[arg(
            long = "comet_command",
            env = "PUNTAJE_COMET_CMD",
            default_value = DEFAULT_COMET_COMMAND
        )]
        comet_command: String,

        /// Abort on the first malformed store line instead of skipping it
        #[arg(long)]
        strict: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    // Initialize tracing
    let log_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .init();

    let result = match cli.command {
        Commands::Convert {
            src,
            hyp,
            refs,
            output,
        } => run_convert(&src, &hyp, &refs, &output),

        Commands::Evaluate {
            input_file,
            output_dir,
            comet_model,
            comet_command,
            strict,
        } => run_evaluate(&EvaluateOptions {
            input: input_file,
            out_dir: output_dir,
            comet_model,
            comet_command,
            strict,
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        if verbose {
            eprintln!("{e:?}");
        }
        std::process::exit(1);
    }
}
