pub mod ask;
pub mod chat;
pub mod config_cmd;

use std::sync::Arc;

use docchat_config::AppConfig;
use docchat_core::provider::GenerationProvider;
use docchat_providers::GeminiProvider;
use docchat_session::ResponseRelay;

/// Build a relay from config, or print a setup guide and bail when no
/// API key is configured. The request is never sent without one.
pub fn build_relay(config: &AppConfig) -> Result<ResponseRelay, Box<dyn std::error::Error>> {
    let Some(api_key) = &config.api_key else {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    DOCCHAT_API_KEY='AIzaSy...'");
        eprintln!("    GEMINI_API_KEY='AIzaSy...'");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        eprintln!("  Get a key at: https://aistudio.google.com/app/apikey");
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    };

    let provider: Arc<dyn GenerationProvider> = Arc::new(GeminiProvider::new(api_key));
    Ok(ResponseRelay::new(provider, &config.model).with_ceiling(config.context_token_ceiling))
}
