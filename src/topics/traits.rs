// Topic assigner trait — swap-ready abstraction.
//
// The default implementation matches keywords against a fixed taxonomy.
// Keeping assignment behind a trait lets a learned classifier replace it
// later without touching the store or the ranker.

use super::taxonomy::TopicId;

/// Trait for assigning a single topic to a piece of article text.
pub trait TopicAssigner: Send + Sync {
    /// Assign the best-matching topic for the given text.
    ///
    /// Never fails: text that matches nothing (including the empty string)
    /// is assigned the taxonomy's default topic.
    fn assign(&self, text: &str) -> TopicId;

    /// Assign a topic per input text, order-preserving.
    fn assign_batch(&self, texts: &[String]) -> Vec<TopicId> {
        texts.iter().map(|t| self.assign(t)).collect()
    }
}
