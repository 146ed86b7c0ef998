use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use superagent_core::console::AnalyzeMode;
use superagent_infrastructure::{ConfigService, init_logging};

mod commands;
mod helper;
mod render;

#[derive(Parser)]
#[command(name = "superagent")]
#[command(about = "Super Agent client - dashboard panels and analysis console", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.config/superagent/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and browse the dashboard panels (default)
    Dashboard,
    /// Interactive analysis console
    Console {
        /// File selected at startup
        #[arg(long)]
        file: Option<String>,
    },
    /// Probe a backend
    Status {
        /// Check the dashboard `/health` route instead of the console
        #[arg(long)]
        dashboard: bool,
    },
    /// Analyze a file through the console backend
    Analyze {
        path: String,
        #[arg(long, default_value = "analizza")]
        mode: AnalyzeMode,
    },
    /// Generate the console report
    Report,
    /// Ask the LLM about a file
    Llm { path: String, instruction: String },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default config file if none exists
    Init,
    /// Print the effective configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let service = ConfigService::new(cli.config)?;
    let config = service.load()?;
    let _log_guard = init_logging(&config.logging);
    tracing::debug!("[CLI] Config loaded from {}", service.path().display());

    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => commands::dashboard::run(&config).await?,
        Commands::Console { file } => commands::console::run(&config, file).await?,
        Commands::Status { dashboard } => commands::oneshot::status(&config, dashboard).await?,
        Commands::Analyze { path, mode } => commands::oneshot::analyze(&config, path, mode).await?,
        Commands::Report => commands::oneshot::report(&config).await?,
        Commands::Llm { path, instruction } => {
            commands::oneshot::llm(&config, path, &instruction).await?
        }
        Commands::Config { action } => match action {
            ConfigAction::Init => commands::config::init(&service)?,
            ConfigAction::Show => commands::config::show(&service, &config)?,
        },
    }

    Ok(())
}
