// Keyword-based topic assignment.
//
// For each configured topic, count how many of its keywords occur in the
// lowercased text as substrings; assign the topic with the strictly highest
// count. Ties — including the all-zero case — go to the lowest-indexed
// topic, so assignment is deterministic and reproducible for any input.

use std::sync::Arc;

use super::taxonomy::{Taxonomy, TopicId};
use super::traits::TopicAssigner;

/// Topic assigner matching a fixed keyword taxonomy.
///
/// Read-only against the shared taxonomy; cheap to clone and safe to share
/// across concurrent ranking calls.
#[derive(Clone)]
pub struct KeywordAssigner {
    taxonomy: Arc<Taxonomy>,
}

impl KeywordAssigner {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self { taxonomy }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }
}

impl TopicAssigner for KeywordAssigner {
    fn assign(&self, text: &str) -> TopicId {
        let lower = text.to_lowercase();

        let mut best = self.taxonomy.default_topic();
        let mut best_hits = 0usize;

        for (idx, topic) in self.taxonomy.topics.iter().enumerate() {
            let hits = topic
                .keywords
                .iter()
                .filter(|kw| lower.contains(kw.as_str()))
                .count();
            // Strict > keeps the first topic on ties
            if hits > best_hits {
                best_hits = hits;
                best = TopicId(idx);
            }
        }

        best
    }
}
