// Engagement store — the append-only per-user interaction log.
//
// The store owns two derivations that must stay deterministic and
// repeatable over the same stored rows: the user's topic-affinity set
// (from clicked interactions, re-assigned through the current assigner)
// and the flattened training set used to refit the click model.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::db::models::Interaction;
use crate::db::Database;
use crate::topics::taxonomy::TopicId;
use crate::topics::traits::TopicAssigner;

/// Shared handle to the interaction log.
#[derive(Clone)]
pub struct EngagementStore {
    db: Arc<dyn Database>,
}

impl EngagementStore {
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }

    /// Append one interaction. The only failure mode is storage I/O, which
    /// propagates to the caller — the caller decides whether to drop the
    /// interaction or retry.
    pub async fn record_interaction(
        &self,
        user_id: &str,
        article_ref: &str,
        clicked: bool,
        article_text: &str,
    ) -> Result<i64> {
        let id = self
            .db
            .insert_interaction(user_id, article_ref, clicked, article_text)
            .await?;
        debug!(user_id, article_ref, clicked, "recorded interaction");
        Ok(id)
    }

    /// One user's interactions in insertion order (empty for unknown users —
    /// an unknown user means "no personalization data", not an error).
    pub async fn history(&self, user_id: &str) -> Result<Vec<Interaction>> {
        self.db.interactions_for_user(user_id).await
    }

    /// The unique set of topics the user has clicked on, derived by
    /// re-assigning each clicked interaction's stored text through the
    /// given assigner. Empty if the user has never clicked anything.
    ///
    /// Uses the full history; a recency-decayed variant is a possible
    /// future extension.
    pub async fn topic_affinities(
        &self,
        user_id: &str,
        assigner: &dyn TopicAssigner,
    ) -> Result<HashSet<TopicId>> {
        let history = self.history(user_id).await?;

        let affinities: HashSet<TopicId> = history
            .iter()
            .filter(|i| i.clicked && !i.article_text.is_empty())
            .map(|i| assigner.assign(&i.article_text))
            .collect();

        Ok(affinities)
    }

    /// Flatten every stored interaction that carries article text into a
    /// (text, 1-if-clicked-else-0) training pair. Per-user order is
    /// preserved; cross-user order carries no meaning. Used exclusively to
    /// refit the click model.
    pub async fn training_data(&self) -> Result<(Vec<String>, Vec<u8>)> {
        let interactions = self.db.all_interactions().await?;

        let mut texts = Vec::new();
        let mut labels = Vec::new();
        for interaction in interactions {
            if interaction.article_text.is_empty() {
                continue;
            }
            texts.push(interaction.article_text);
            labels.push(u8::from(interaction.clicked));
        }

        Ok((texts, labels))
    }
}
