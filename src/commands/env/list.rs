use anyhow::Result;
use colored::Colorize;

use tuition_cli::config::Config;

pub async fn list_command() -> Result<()> {
    let config = Config::load()?;

    let environments = config.list_environments();
    if environments.is_empty() {
        println!("No environments configured. Run 'tuition-cli env add' to create one.");
        return Ok(());
    }

    for env_name in environments {
        let Some(api) = config.environments.get(env_name) else {
            continue;
        };
        let token = if api.token.is_some() { "token" } else { "no token" };
        if config.get_current_environment_name() == Some(env_name) {
            println!("  ● {} {} ({}, current)", env_name.green(), api.base_url, token);
        } else {
            println!("  ○ {} {} ({})", env_name, api.base_url, token);
        }
    }

    Ok(())
}
