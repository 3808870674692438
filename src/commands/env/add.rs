use anyhow::Result;
use log::info;

use tuition_cli::config::{ApiConfig, Config};
use tuition_cli::ui::{prompt_base_url, prompt_overwrite_confirmation, prompt_token};

pub async fn add_command(name: String, base_url: Option<String>, token: Option<String>, force: bool) -> Result<()> {
    info!("Adding environment: {}", name);

    let mut config = Config::load()?;

    if config.environments.contains_key(&name) && !force && !prompt_overwrite_confirmation(&name)? {
        println!("Environment '{}' left unchanged.", name);
        return Ok(());
    }

    let base_url = prompt_base_url(base_url)?;
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        anyhow::bail!("Backend URL must start with http:// or https://, got '{}'", base_url);
    }
    let token = prompt_token(token)?;

    config.add_environment(
        name.clone(),
        ApiConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        },
    )?;

    println!("✓ Environment '{}' saved", name);
    if config.get_current_environment_name() == Some(&name) {
        println!("Current environment: {}", name);
    }

    Ok(())
}
