//! CLI client for SDS batch upload and spreadsheet export.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, history, login, quota, tools, upload};

/// sdbx - upload safety data sheets for extraction and export the results
#[derive(Parser)]
#[command(name = "sdbx")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login(login::LoginArgs),

    /// Show remaining uploads for a tool
    Quota(quota::QuotaArgs),

    /// Upload documents and export the extracted records
    Upload(upload::UploadArgs),

    /// Export previously processed records
    History(history::HistoryArgs),

    /// List builtin export layouts
    Tools(tools::ToolsArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
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
        Commands::Login(args) => login::run(args, cli.config.as_deref()).await,
        Commands::Quota(args) => quota::run(args, cli.config.as_deref()).await,
        Commands::Upload(args) => upload::run(args, cli.config.as_deref()).await,
        Commands::History(args) => history::run(args, cli.config.as_deref()).await,
        Commands::Tools(args) => tools::run(args).await,
        Commands::Config(args) => config::run(args, cli.config.as_deref()).await,
    }
}
