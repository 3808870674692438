use anyhow::Result;
use colored::Colorize;

use tuition_cli::api::EntityType;

/// List entity types with their endpoint and sanitization fields
pub async fn entities_command() -> Result<()> {
    let header = format!(
        "{:<18} {:<26} {:<12} {}",
        "ENTITY", "ENDPOINT", "DISPLAY", "GENERATED KEY"
    );
    println!("{}", header.bold());

    for entity in EntityType::all() {
        println!(
            "{:<18} {:<26} {:<12} {}",
            entity.tag(),
            entity.endpoint(),
            entity.display_field(),
            entity.generated_key().unwrap_or("-")
        );
    }

    Ok(())
}
