//! Config command handlers.

use anyhow::{Context, Result};
use listwise_core::config;
use listwise_core::providers::ProviderKind;

pub fn path() {
    println!("{}", config::paths::config_path().display());
}

pub fn init() -> Result<()> {
    let config_path = config::paths::config_path();
    config::Config::init(&config_path)
        .with_context(|| format!("init config at {}", config_path.display()))?;
    println!("Created config at {}", config_path.display());
    Ok(())
}

pub fn generate() -> Result<()> {
    let toml = config::Config::generate()?;
    print!("{toml}");
    Ok(())
}

pub fn set_provider(kind: ProviderKind) -> Result<()> {
    config::Config::save_provider(kind).with_context(|| {
        format!(
            "save provider to {}",
            config::paths::config_path().display()
        )
    })?;
    println!("Provider set to {} ({})", kind.id(), kind.label());
    Ok(())
}
