use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{ConfigCommand, HeroCommand, SectionCommand, ShowCommand, ThemeCommand};
use config::Config;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Edit and publish portfolio documents", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a portfolio
    Show(ShowCommand),

    /// Add, remove and arrange sections
    Section(SectionCommand),

    /// Edit the hero block
    Hero(HeroCommand),

    /// Change the theme
    Theme(ThemeCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=info,folio_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Show(cmd)) => cmd.run(&config).await?,
        Some(Commands::Section(cmd)) => cmd.run(&config).await?,
        Some(Commands::Hero(cmd)) => cmd.run(&config).await?,
        Some(Commands::Theme(cmd)) => cmd.run(&config).await?,
        Some(Commands::Config(cmd)) => cmd.run(&config)?,
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
