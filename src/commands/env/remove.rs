use anyhow::Result;
use log::info;

use tuition_cli::config::Config;
use tuition_cli::ui::prompt_remove_confirmation;

pub async fn remove_command(name: String, force: bool) -> Result<()> {
    info!("Removing environment: {}", name);

    let mut config = Config::load()?;

    if !config.environments.contains_key(&name) {
        println!("Environment '{}' not found.", name);
        println!("Available environments:");
        for env_name in config.list_environments() {
            if config.get_current_environment_name() == Some(env_name) {
                println!("  ● {} (current)", env_name);
            } else {
                println!("  ○ {}", env_name);
            }
        }
        return Ok(());
    }

    if config.get_current_environment_name() == Some(&name) {
        println!("⚠ Warning: '{}' is the current environment", name);
    }

    let confirm = if force {
        true
    } else {
        prompt_remove_confirmation(&name)?
    };

    if !confirm {
        println!("Removal cancelled.");
        return Ok(());
    }

    config.remove_environment(&name)?;
    println!("✓ Environment '{}' removed successfully", name);

    if let Some(current) = config.get_current_environment_name() {
        println!("Current environment: {}", current);
    } else {
        println!("No current environment selected. Run 'tuition-cli env select' to choose one.");
    }

    Ok(())
}
