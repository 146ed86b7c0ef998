use anyhow::{Context, Result};
use superagent_core::config::ClientConfig;
use superagent_infrastructure::ConfigService;

use crate::render;

pub fn init(service: &ConfigService) -> Result<()> {
    service.init_default_file()?;
    println!("{}", service.path().display());
    Ok(())
}

/// Prints the effective configuration, env overrides included.
pub fn show(service: &ConfigService, config: &ClientConfig) -> Result<()> {
    let text = toml::to_string_pretty(config).context("failed to serialize configuration")?;
    println!("{}", render::hint(&format!("# {}", service.path().display())));
    print!("{}", text);
    Ok(())
}
