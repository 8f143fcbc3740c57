//! cogrisk CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "cogrisk",
    version,
    about = "Dementia-risk screening from cognitive and speech measurements"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score assessment inputs and write reports
    Assess {
        /// Path to .toml assessment input or directory
        #[arg(long)]
        input: PathBuf,

        /// Output directory (default: from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, markdown, all
        #[arg(long, default_value = "json")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Seed for the confidence jitter
        #[arg(long)]
        seed: Option<u64>,

        /// Report the midpoint of the confidence band instead of jitter
        #[arg(long)]
        midpoint: bool,
    },

    /// Validate assessment input TOML files
    Validate {
        /// Path to assessment input file or directory
        #[arg(long)]
        input: PathBuf,
    },

    /// Render a saved assessment report
    Show {
        /// Report JSON
        #[arg(long)]
        report: PathBuf,

        /// Output format: text, markdown, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config and example assessment input
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cogrisk=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Assess {
            input,
            output,
            format,
            config,
            seed,
            midpoint,
        } => commands::assess::execute(input, output, format, config, seed, midpoint),
        Commands::Validate { input } => commands::validate::execute(input),
        Commands::Show { report, format } => commands::show::execute(report, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
