use anyhow::Result;
use log::info;

use super::input::read_record;
use crate::cli::commands::duplicate::SanitizeArgs;
use tuition_cli::duplicate::sanitize_for_attempt;

pub async fn sanitize_command(args: SanitizeArgs) -> Result<()> {
    info!("Sanitizing {} record for attempt {}", args.entity, args.attempt);

    let record = read_record(&args.file)?;
    let candidate = sanitize_for_attempt(&record, args.entity, args.attempt);
    println!("{}", serde_json::to_string_pretty(&candidate)?);

    Ok(())
}
