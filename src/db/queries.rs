// Database queries — CRUD operations for all tables.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust
// interfaces.

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{Interaction, InteractionCounts};

// --- Interactions ---

/// Append one interaction. The database stamps `recorded_at`.
/// Returns the new row id.
pub fn insert_interaction(
    conn: &Connection,
    user_id: &str,
    article_ref: &str,
    clicked: bool,
    article_text: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO interactions (user_id, article_ref, article_text, clicked)
         VALUES (?1, ?2, ?3, ?4)",
        params![user_id, article_ref, article_text, clicked],
    )?;
    Ok(conn.last_insert_rowid())
}

/// One user's interactions in insertion order. Empty for unknown users.
pub fn interactions_for_user(conn: &Connection, user_id: &str) -> Result<Vec<Interaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, article_ref, article_text, clicked, recorded_at
         FROM interactions
         WHERE user_id = ?1
         ORDER BY id ASC",
    )?;
    let rows = stmt.query_map(params![user_id], row_to_interaction)?;

    let mut interactions = Vec::new();
    for row in rows {
        interactions.push(row?);
    }
    Ok(interactions)
}

/// Every interaction across all users, grouped by user with per-user
/// insertion order preserved. Cross-user order is not meaningful.
pub fn all_interactions(conn: &Connection) -> Result<Vec<Interaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, article_ref, article_text, clicked, recorded_at
         FROM interactions
         ORDER BY user_id ASC, id ASC",
    )?;
    let rows = stmt.query_map([], row_to_interaction)?;

    let mut interactions = Vec::new();
    for row in rows {
        interactions.push(row?);
    }
    Ok(interactions)
}

/// Aggregate counts for the status display.
pub fn interaction_counts(conn: &Connection) -> Result<InteractionCounts> {
    let counts = conn.query_row(
        "SELECT COUNT(DISTINCT user_id), COUNT(*), COALESCE(SUM(clicked), 0)
         FROM interactions",
        [],
        |row| {
            Ok(InteractionCounts {
                users: row.get(0)?,
                total: row.get(1)?,
                clicks: row.get(2)?,
            })
        },
    )?;
    Ok(counts)
}

fn row_to_interaction(row: &rusqlite::Row<'_>) -> rusqlite::Result<Interaction> {
    Ok(Interaction {
        id: row.get(0)?,
        user_id: row.get(1)?,
        article_ref: row.get(2)?,
        article_text: row.get(3)?,
        clicked: row.get(4)?,
        recorded_at: row.get(5)?,
    })
}

// --- Model state ---

/// Get a model state value by key (e.g., "click_rate").
pub fn get_model_state(conn: &Connection, key: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare("SELECT value FROM model_state WHERE key = ?1")?;
    let result = stmt.query_row(params![key], |row| row.get(0)).optional()?;
    Ok(result)
}

/// Set a model state value (upsert).
pub fn set_model_state(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO model_state (key, value, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
        params![key, value],
    )?;
    Ok(())
}
