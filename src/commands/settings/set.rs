use anyhow::Result;
use log::info;

use tuition_cli::config::Config;

/// Set the value of a specific setting
///
/// # Arguments
/// * `name` - Setting name
/// * `value` - Setting value
///
/// # Returns
/// * `Ok(())` - Setting updated successfully
/// * `Err(anyhow::Error)` - Configuration error or invalid setting/value
pub async fn set_command(name: String, value: String) -> Result<()> {
    info!("Setting {} to {}", name, value);

    let mut config = Config::load()?;

    match name.as_str() {
        "max-duplicate-attempts" => {
            let attempts: u32 = value.parse().map_err(|_| {
                anyhow::anyhow!("Invalid value for max-duplicate-attempts: '{}'. Must be a positive integer.", value)
            })?;

            if attempts > 20 {
                println!("Warning: {} attempts means up to {} create requests per duplication.", attempts, attempts);
            }

            config.update_max_duplicate_attempts(attempts)?;
            println!("Set max-duplicate-attempts to {}", attempts);
        }
        "request-timeout" => {
            let secs: u64 = value.parse().map_err(|_| {
                anyhow::anyhow!("Invalid value for request-timeout: '{}'. Must be a number of seconds.", value)
            })?;

            config.update_request_timeout(secs)?;
            println!("Set request-timeout to {}s", secs);
        }
        _ => {
            anyhow::bail!("Unknown setting: {}", name);
        }
    }

    Ok(())
}
