use clap::{Args, Subcommand};

#[derive(Args)]
pub struct EnvCommands {
    #[command(subcommand)]
    pub command: EnvSubcommands,
}

#[derive(Subcommand)]
pub enum EnvSubcommands {
    /// Add a backend environment
    Add {
        /// Environment name (e.g. 'production', 'local')
        name: String,
        /// Backend base URL
        #[arg(long)]
        base_url: Option<String>,
        /// Bearer token sent with every request
        #[arg(long)]
        token: Option<String>,
        /// Overwrite an existing environment without asking
        #[arg(short, long)]
        force: bool,
    },
    /// Select the current environment
    Select {
        /// Environment name (prompted when omitted)
        name: Option<String>,
    },
    /// List configured environments
    List,
    /// Remove an environment
    Remove {
        /// Environment name to remove
        name: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}
