// System status display — DB stats, model state, taxonomy source.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::db::Database;
use crate::engine::{CLICK_RATE_KEY, TAXONOMY_KEY};
use crate::topics::taxonomy::Taxonomy;

/// Display system status to the terminal.
pub async fn show(db: &Arc<dyn Database>, db_display_path: &str) -> Result<()> {
    if !Path::new(db_display_path).exists() {
        println!("Database: not initialized");
        println!("\nRun `gazette init` to set up the database.");
        return Ok(());
    }

    // Database file size
    let file_size = std::fs::metadata(db_display_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", db_display_path, file_size);

    // Interaction log
    let counts = db.interaction_counts().await?;
    if counts.total == 0 {
        println!("Interactions: none recorded yet");
        println!("  Run `gazette record <user> --title ... --clicked` to add one");
    } else {
        println!(
            "Interactions: {} from {} users ({} clicks)",
            counts.total, counts.users, counts.clicks
        );
    }

    // Click model
    match db.get_model_state(CLICK_RATE_KEY).await? {
        Some(rate) => println!("Click model: rate {rate}"),
        None => {
            println!("Click model: not yet fit (default rate applies)");
            println!("  Run `gazette refit` after recording interactions");
        }
    }

    // Taxonomy
    match db.get_model_state(TAXONOMY_KEY).await? {
        Some(json) => {
            let topics = serde_json::from_str::<Taxonomy>(&json)
                .map(|t| t.len())
                .unwrap_or(0);
            println!("Taxonomy: {topics} topics (persisted)");
        }
        None => println!(
            "Taxonomy: built-in default ({} topics)",
            Taxonomy::default().len()
        ),
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
