use clap::{Args, Subcommand};

#[derive(Args)]
pub struct SettingsCommands {
    #[command(subcommand)]
    pub command: SettingsSubcommands,
}

#[derive(Subcommand)]
pub enum SettingsSubcommands {
    /// Show current settings
    Show,
    /// Set the value of a specific setting
    Set {
        /// Setting name (max-duplicate-attempts, request-timeout)
        name: String,
        /// Setting value
        value: String,
    },
}
