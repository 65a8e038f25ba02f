// Data models — Rust structs that map to database rows.
//
// Separate from the queries so other modules can use them without
// depending on rusqlite directly.

use serde::{Deserialize, Serialize};

/// One recorded user action on an article (view or click).
///
/// Interactions are append-only: created exactly once, never mutated or
/// deleted. Per-user order is insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub id: i64,
    pub user_id: String,
    /// External article reference — URL when available, title otherwise.
    pub article_ref: String,
    /// The article's title + description, kept verbatim so the interaction
    /// can be re-assigned a topic or re-scored later.
    pub article_text: String,
    pub clicked: bool,
    pub recorded_at: String,
}

/// Aggregate interaction counts for status displays.
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractionCounts {
    pub users: i64,
    pub total: i64,
    pub clicks: i64,
}
