//! Non-interactive commands: one request, printed result, exit status.

use std::sync::Arc;

use anyhow::{Result, bail};
use superagent_application::ConsoleShell;
use superagent_application::console_shell::StatusIndicator;
use superagent_core::DashboardApi;
use superagent_core::config::ClientConfig;
use superagent_core::console::AnalyzeMode;
use superagent_interaction::{ConsoleClient, DashboardClient};

use crate::render;

fn console_shell(config: &ClientConfig) -> Result<ConsoleShell> {
    Ok(ConsoleShell::new(Arc::new(ConsoleClient::new(&config.console)?)))
}

async fn print_pane(shell: &ConsoleShell) {
    for line in &shell.view().await.lines {
        println!("{}", render::console_line(line));
    }
}

/// Probes the console backend, or the dashboard `/health` route.
pub async fn status(config: &ClientConfig, dashboard: bool) -> Result<()> {
    if dashboard {
        let client = DashboardClient::new(&config.dashboard)?;
        let health = client.health().await?;
        match health.message {
            Some(message) => println!("{} {}", health.status, render::hint(&message)),
            None => println!("{}", health.status),
        }
        return Ok(());
    }

    let shell = console_shell(config)?;
    shell.check_status().await;
    let status = shell.view().await.status;
    println!("{}", render::status_indicator(&status));
    if status == StatusIndicator::Offline {
        bail!("console backend at {} is offline", config.console.base_url);
    }
    Ok(())
}

pub async fn analyze(config: &ClientConfig, path: String, mode: AnalyzeMode) -> Result<()> {
    let shell = console_shell(config)?;
    shell.set_file_path(path).await;
    shell.set_mode(mode).await;
    shell.analyze().await;
    print_pane(&shell).await;
    Ok(())
}

pub async fn report(config: &ClientConfig) -> Result<()> {
    let shell = console_shell(config)?;
    shell.report().await;
    print_pane(&shell).await;
    Ok(())
}

pub async fn llm(config: &ClientConfig, path: String, instruction: &str) -> Result<()> {
    let shell = console_shell(config)?;
    shell.set_file_path(path).await;
    shell.llm_assist(instruction).await;
    print_pane(&shell).await;
    Ok(())
}
