use anyhow::Result;
use dialoguer::{Input, Password, Select};

/// Interactive confirmation prompt using arrow-key navigable selection
///
/// # Arguments
/// * `prompt` - The question to ask the user
/// * `default_yes` - Whether "Yes" should be the default selection (index 0)
///
/// # Returns
/// * `Ok(true)` if user selects "Yes"
/// * `Ok(false)` if user selects "No"
pub fn prompt_confirmation(prompt: &str, default_yes: bool) -> Result<bool> {
    let items = vec!["Yes", "No"];
    let default_index = if default_yes { 0 } else { 1 };

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(default_index)
        .interact()?;

    Ok(selection == 0)
}

pub fn prompt_overwrite_confirmation(env_name: &str) -> Result<bool> {
    prompt_confirmation(
        &format!("Environment '{}' already exists. Overwrite?", env_name),
        false,
    )
}

pub fn prompt_remove_confirmation(env_name: &str) -> Result<bool> {
    prompt_confirmation(&format!("Remove environment '{}'?", env_name), false)
}

pub fn prompt_environment_selection(env_names: &[String], current_env: Option<&String>) -> Result<String> {
    let items: Vec<String> = env_names
        .iter()
        .map(|env| {
            if current_env == Some(env) {
                format!("{} (current)", env)
            } else {
                env.clone()
            }
        })
        .collect();

    let selection = Select::new()
        .with_prompt("Select environment")
        .items(&items)
        .interact()?;

    Ok(env_names[selection].clone())
}

/// Backend base URL, prompted unless given on the command line
pub fn prompt_base_url(base_url: Option<String>) -> Result<String> {
    match base_url {
        Some(url) => Ok(url),
        None => Ok(Input::<String>::new()
            .with_prompt("Backend URL (e.g., https://admin.mytuition.com)")
            .interact()?),
    }
}

/// Optional bearer token; an empty answer means no token
pub fn prompt_token(token: Option<String>) -> Result<Option<String>> {
    if token.is_some() {
        return Ok(token);
    }

    let value = Password::new()
        .with_prompt("API token (leave empty for none)")
        .allow_empty_password(true)
        .interact()?;

    Ok(Some(value).filter(|v| !v.is_empty()))
}
