use anyhow::Result;
use colored::Colorize;
use log::{error, info};

use super::input::read_record;
use crate::cli::commands::duplicate::DuplicateArgs;
use tuition_cli::api::{MonitoringConfig, TuitionClient};
use tuition_cli::config::Config;
use tuition_cli::duplicate::{Duplicator, sanitize};

/// Duplicate a record and print the created copy
pub async fn duplicate_command(args: DuplicateArgs) -> Result<()> {
    info!("Duplicating {} record", args.entity);

    let config = Config::load()?;
    let settings = config.get_settings().clone();

    let build_client = || -> Result<TuitionClient> {
        let api = config.resolve_api()?;
        let client = TuitionClient::from_config(&api, &settings)?;
        Ok(match (args.verbose, args.quiet) {
            (true, _) => client.with_monitoring(MonitoringConfig::verbose()),
            (_, true) => client.with_monitoring(MonitoringConfig::quiet()),
            _ => client,
        })
    };

    let record = match (&args.file, &args.id) {
        (Some(path), _) => read_record(path)?,
        (None, Some(id)) => build_client()?.fetch_record(args.entity, id).await?,
        (None, None) => anyhow::bail!("Either --file or --id is required"),
    };

    if args.dry_run {
        let candidate = sanitize(&record, args.entity);
        println!("{}", serde_json::to_string_pretty(&candidate)?);
        return Ok(());
    }

    let max_attempts = args.max_attempts.unwrap_or(settings.max_duplicate_attempts);
    let client = build_client()?;
    println!(
        "Duplicating {} via {}{}",
        args.entity.to_string().bold(),
        client.base_url(),
        args.entity.endpoint()
    );

    let logger = client.logger().clone();
    let duplicator = Duplicator::new(client)
        .with_max_attempts(max_attempts)
        .with_logger(logger);
    match duplicator.duplicate(&record, args.entity).await {
        Ok(duplicated) => {
            info!("Duplicated {} in {} attempt(s)", args.entity, duplicated.attempts);
            println!(
                "{} Created {} copy ({} attempt{})",
                "✓".green(),
                args.entity,
                duplicated.attempts,
                if duplicated.attempts == 1 { "" } else { "s" }
            );
            println!("{}", serde_json::to_string_pretty(&duplicated.record)?);
            Ok(())
        }
        Err(e) => {
            error!("Duplication of {} failed: {}", args.entity, e);
            println!("{} {}", "✗".red(), e.message());
            anyhow::bail!("Duplication failed after {} attempt(s)", e.attempts())
        }
    }
}
