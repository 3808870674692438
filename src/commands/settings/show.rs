use anyhow::Result;
use log::info;

use tuition_cli::config::{Config, ENV_API_TOKEN, ENV_API_URL};

/// Show current settings and the resolved backend connection
pub async fn show_command() -> Result<()> {
    info!("Showing settings");

    let config = Config::load()?;
    let settings = config.get_settings();

    println!("Settings");
    println!("========");
    println!("max-duplicate-attempts: {}", settings.max_duplicate_attempts);
    println!("request-timeout:        {}s", settings.request_timeout_secs);

    println!();
    match config.resolve_api() {
        Ok(api) => {
            println!("Backend: {}", api.base_url);
            println!("Token:   {}", if api.token.is_some() { "configured" } else { "none" });
        }
        Err(_) => println!("Backend: not configured (set {} or run 'tuition-cli env add')", ENV_API_URL),
    }

    if std::env::var(ENV_API_URL).is_ok() || std::env::var(ENV_API_TOKEN).is_ok() {
        println!("(overridden by environment variables)");
    }

    Ok(())
}
