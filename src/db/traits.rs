// Database trait — backend-agnostic async interface for all DB operations.
//
// The single implementor wraps rusqlite behind a tokio Mutex; methods are
// async so callers (web handlers, the engine) never block an executor
// thread on file I/O. The trait also keeps the engagement store testable
// against an in-memory database.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{Interaction, InteractionCounts};

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Interactions ---

    /// Append one interaction, returning its row id.
    async fn insert_interaction(
        &self,
        user_id: &str,
        article_ref: &str,
        clicked: bool,
        article_text: &str,
    ) -> Result<i64>;

    /// One user's interactions in insertion order (empty if unknown user).
    async fn interactions_for_user(&self, user_id: &str) -> Result<Vec<Interaction>>;

    /// Every stored interaction, per-user order preserved.
    async fn all_interactions(&self) -> Result<Vec<Interaction>>;

    /// Aggregate counts (users, total, clicks).
    async fn interaction_counts(&self) -> Result<InteractionCounts>;

    // --- Model state ---

    /// Get a persisted model value by key (e.g., "click_rate").
    async fn get_model_state(&self, key: &str) -> Result<Option<String>>;

    /// Set a persisted model value (upsert).
    async fn set_model_state(&self, key: &str, value: &str) -> Result<()>;
}
