use super::commands::duplicate::{DuplicateArgs, SanitizeArgs};
use super::commands::env::EnvCommands;
use super::commands::settings::SettingsCommands;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tuition-cli")]
#[command(about = "A CLI tool for duplicating tuition-center records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Duplicate a record through its creation endpoint
    Duplicate(DuplicateArgs),
    /// Print the payload a duplication would submit
    Sanitize(SanitizeArgs),
    /// List supported entity types and their endpoints
    Entities,
    /// Backend environment management
    Env(EnvCommands),
    /// Application settings management
    Settings(SettingsCommands),
}
