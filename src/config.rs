use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::duplicate::DEFAULT_MAX_ATTEMPTS;

/// Environment variable overriding the backend base URL
pub const ENV_API_URL: &str = "TUITION_API_URL";
/// Environment variable overriding the backend bearer token
pub const ENV_API_TOKEN: &str = "TUITION_API_TOKEN";

/// Connection details for one backend environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    pub current_environment: Option<String>,
    #[serde(default)]
    pub environments: HashMap<String, ApiConfig>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(skip)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_max_duplicate_attempts")]
    pub max_duplicate_attempts: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_max_duplicate_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_duplicate_attempts: default_max_duplicate_attempts(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("tuition-cli")
        } else {
            // Use home directory with dot prefix on Windows/Mac
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".tuition-cli")
        };

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
            info!("Created config directory: {:?}", config_dir);
        }

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load from an explicit path; a missing file yields the default config
    pub fn load_from(config_path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using default config");
            return Ok(Self {
                path: Some(config_path.to_path_buf()),
                ..Self::default()
            });
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let mut config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
        config.path = Some(config_path.to_path_buf());

        debug!("Loaded config with {} environments", config.environments.len());
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = match &self.path {
            Some(path) => path.clone(),
            None => Self::get_config_path()?,
        };
        debug!("Saving config to: {:?}", config_path);

        let config_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&config_path, config_content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        info!("Config saved successfully");
        Ok(())
    }

    pub fn add_environment(&mut self, name: String, api_config: ApiConfig) -> Result<()> {
        info!("Adding environment: {}", name);
        self.environments.insert(name.clone(), api_config);

        // First environment becomes the current one
        if self.current_environment.is_none() {
            self.current_environment = Some(name.clone());
            info!("Set {} as current environment", name);
        }

        self.save()
    }

    pub fn get_current_api(&self) -> Option<&ApiConfig> {
        let current_env = self.current_environment.as_ref()?;
        self.environments.get(current_env)
    }

    pub fn get_current_environment_name(&self) -> Option<&String> {
        self.current_environment.as_ref()
    }

    pub fn set_current_environment(&mut self, name: String) -> Result<()> {
        if !self.environments.contains_key(&name) {
            anyhow::bail!("Environment '{}' not found", name);
        }

        info!("Setting current environment to: {}", name);
        self.current_environment = Some(name);
        self.save()
    }

    /// Environment names, sorted
    pub fn list_environments(&self) -> Vec<&String> {
        let mut names: Vec<&String> = self.environments.keys().collect();
        names.sort();
        names
    }

    pub fn remove_environment(&mut self, name: &str) -> Result<()> {
        if !self.environments.contains_key(name) {
            anyhow::bail!("Environment '{}' not found", name);
        }

        info!("Removing environment: {}", name);
        self.environments.remove(name);

        if self.current_environment.as_deref() == Some(name) {
            warn!("Removed current environment, clearing current selection");
            self.current_environment = None;
        }

        self.save()
    }

    pub fn get_settings(&self) -> &Settings {
        &self.settings
    }

    pub fn update_max_duplicate_attempts(&mut self, attempts: u32) -> Result<()> {
        if attempts == 0 {
            anyhow::bail!("Max duplicate attempts must be at least 1");
        }
        info!("Updating max duplicate attempts to: {}", attempts);
        self.settings.max_duplicate_attempts = attempts;
        self.save()
    }

    pub fn update_request_timeout(&mut self, secs: u64) -> Result<()> {
        if secs == 0 {
            anyhow::bail!("Request timeout must be at least 1 second");
        }
        info!("Updating request timeout to: {}s", secs);
        self.settings.request_timeout_secs = secs;
        self.save()
    }

    /// Resolve the API connection to use.
    ///
    /// `TUITION_API_URL` / `TUITION_API_TOKEN` take precedence over the
    /// selected environment. A stored token is only sent to its own
    /// environment's URL.
    pub fn resolve_api(&self) -> Result<ApiConfig> {
        let url_override = std::env::var(ENV_API_URL).ok().filter(|v| !v.is_empty());
        let token_override = std::env::var(ENV_API_TOKEN).ok().filter(|v| !v.is_empty());
        self.resolve_api_with(url_override, token_override)
    }

    fn resolve_api_with(&self, url_override: Option<String>, token_override: Option<String>) -> Result<ApiConfig> {
        let current = self.get_current_api();

        let (base_url, stored_token) = match (url_override, current) {
            (Some(url), _) => (url, None),
            (None, Some(api)) => (api.base_url.clone(), api.token.clone()),
            (None, None) => anyhow::bail!(
                "No environment selected. Run 'tuition-cli env add' or set {}",
                ENV_API_URL
            ),
        };

        Ok(ApiConfig {
            base_url,
            token: token_override.or(stored_token),
        })
    }
}
