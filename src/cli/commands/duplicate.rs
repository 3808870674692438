use clap::Args;
use std::path::PathBuf;
use tuition_cli::api::EntityType;

#[derive(Args)]
pub struct DuplicateArgs {
    /// Entity type (e.g. Student, CustomerPolicy, "Transport Customer")
    pub entity: EntityType,
    /// JSON file holding the source record ('-' reads stdin)
    #[arg(short, long, required_unless_present = "id", conflicts_with = "id")]
    pub file: Option<PathBuf>,
    /// Fetch the source record from the backend by id
    #[arg(long)]
    pub id: Option<String>,
    /// Print the sanitized payload without submitting it
    #[arg(long)]
    pub dry_run: bool,
    /// Override the configured attempt ceiling
    #[arg(long)]
    pub max_attempts: Option<u32>,
    /// Log request and response details
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
    /// Only log failures
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct SanitizeArgs {
    /// Entity type
    pub entity: EntityType,
    /// JSON file holding the source record ('-' reads stdin)
    #[arg(short, long)]
    pub file: PathBuf,
    /// Attempt number whose email suffix to apply
    #[arg(short, long, default_value_t = 0)]
    pub attempt: u32,
}
