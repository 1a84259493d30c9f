//! CLI application for digitizing geodetic survey documents.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Extract fields and coordinate catalogs from OCR survey documents
#[derive(Parser)]
#[command(name = "geokat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a communication-type catalog JSON file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a single document text file
    Process(commands::process::ProcessArgs),

    /// Process multiple document text files
    Batch(commands::batch::BatchArgs),

    /// Show the communication-type catalog
    Types(commands::types::TypesArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Process(args) => commands::process::run(args, cli.config.as_deref()),
        Commands::Batch(args) => commands::batch::run(args, cli.config.as_deref()),
        Commands::Types(args) => commands::types::run(args, cli.config.as_deref()),
    }
}
