use anyhow::Result;
use clap::Parser;
use log::info;

mod cli;
mod commands;

use cli::Cli;
use cli::app::Commands;
use cli::commands::env::EnvSubcommands;
use cli::commands::settings::SettingsSubcommands;
use commands::duplicate::{duplicate_command, entities_command, sanitize_command};
use commands::env::{add_command, list_command, remove_command, select_command};
use commands::settings::{set_command, show_command};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("tuition-cli.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    // TUITION_API_URL / TUITION_API_TOKEN may come from a local .env
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded environment from {:?}", path);
    }

    let cli = Cli::parse();
    info!("Starting tuition-cli");

    match cli.command {
        Commands::Duplicate(args) => duplicate_command(args).await,
        Commands::Sanitize(args) => sanitize_command(args).await,
        Commands::Entities => entities_command().await,
        Commands::Env(env) => match env.command {
            EnvSubcommands::Add { name, base_url, token, force } => {
                add_command(name, base_url, token, force).await
            }
            EnvSubcommands::Select { name } => select_command(name).await,
            EnvSubcommands::List => list_command().await,
            EnvSubcommands::Remove { name, force } => remove_command(name, force).await,
        },
        Commands::Settings(settings) => match settings.command {
            SettingsSubcommands::Show => show_command().await,
            SettingsSubcommands::Set { name, value } => set_command(name, value).await,
        },
    }
}
