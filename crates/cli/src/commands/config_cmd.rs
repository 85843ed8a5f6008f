//! `docchat config` — show the effective configuration.

use docchat_config::AppConfig;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let path = AppConfig::config_dir().join("config.toml");

    println!("Config file: {}", path.display());
    println!("  api_key:               {}", if config.has_api_key() { "[set]" } else { "[not set]" });
    println!("  model:                 {}", config.model);
    println!("  temperature:           {}", config.temperature);
    println!("  max_output_tokens:     {}", config.max_output_tokens);
    println!("  language:              {}", config.language);
    println!("  context_token_ceiling: {}", config.context_token_ceiling);

    Ok(())
}
