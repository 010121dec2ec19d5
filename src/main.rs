mod cli;
mod server;
mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tools::command::QuoteCommand;
use tracing_subscriber::EnvFilter;

use quotebot::config::QuotebotConfig;

#[derive(Parser)]
#[command(name = "quotebot", version, about = "Serve quotes from a shared corpus")]
struct Cli {
    /// Config file to use instead of ~/.quotebot/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the quote server (transport from config: stdio or http)
    Serve,
    /// Show a random quote
    Random,
    /// Show a quote from a specific person
    From { name: String },
    /// Show a quote about a specific subject
    About { content: String },
    /// List all quotes from a specific person
    ListFrom { name: String },
    /// List all quotes about a specific subject
    ListAbout { content: String },
    /// Show corpus statistics
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => QuotebotConfig::load_from(path)?,
        None => QuotebotConfig::load()?,
    };

    // Log to stderr so stdout stays clean for the stdio transport and CLI output.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting quotebot");

    match cli.command {
        Command::Serve => match config.server.transport.as_str() {
            "http" => server::serve_http(config).await?,
            "stdio" => server::serve_stdio(config).await?,
            other => anyhow::bail!("unknown transport: {other}. Supported: stdio, http"),
        },
        Command::Random => cli::lookup(&config, QuoteCommand::Random, "").await?,
        Command::From { name } => cli::lookup(&config, QuoteCommand::From, &name).await?,
        Command::About { content } => cli::lookup(&config, QuoteCommand::About, &content).await?,
        Command::ListFrom { name } => cli::lookup(&config, QuoteCommand::ListFrom, &name).await?,
        Command::ListAbout { content } => {
            cli::lookup(&config, QuoteCommand::ListAbout, &content).await?
        }
        Command::Stats => cli::stats(&config).await?,
    }

    Ok(())
}
