// Combined relevance formula.
//
// Relevance blends the click-rate estimate with a content score derived
// from the user's topic affinities:
//
//   relevance = ctr_weight * ctr + content_weight * content
//
// where content is a fixed bonus (1.0) for articles in a topic the user
// has clicked before, and a neutral baseline (0.5) otherwise. The baseline
// is an explicit "no signal" value, not an unknown.

use std::collections::HashSet;

use crate::topics::taxonomy::TopicId;

/// Configurable weights for the relevance formula.
///
/// The 0.7 / 0.3 split and the affinity / baseline content scores are
/// tunable constants, not derived values.
#[derive(Debug, Clone, Copy)]
pub struct RelevanceWeights {
    /// Weight on the click-rate estimate (default 0.7)
    pub ctr_weight: f64,
    /// Weight on the topic-affinity content score (default 0.3)
    pub content_weight: f64,
    /// Content score for articles in a topic the user has clicked (default 1.0)
    pub affinity_content: f64,
    /// Neutral content baseline for everything else (default 0.5)
    pub baseline_content: f64,
}

impl Default for RelevanceWeights {
    fn default() -> Self {
        Self {
            ctr_weight: 0.7,
            content_weight: 0.3,
            affinity_content: 1.0,
            baseline_content: 0.5,
        }
    }
}

impl RelevanceWeights {
    /// Content score for an article's topic given the user's affinity set.
    pub fn content_score(&self, topic: TopicId, affinities: &HashSet<TopicId>) -> f64 {
        if affinities.contains(&topic) {
            self.affinity_content
        } else {
            self.baseline_content
        }
    }

    /// Combine a click score and a content score into the final relevance.
    pub fn combine(&self, ctr: f64, content: f64) -> f64 {
        self.ctr_weight * ctr + self.content_weight * content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_default_weights() {
        let weights = RelevanceWeights::default();
        // 0.7 * 0.1 + 0.3 * 1.0 = 0.37
        assert!((weights.combine(0.1, 1.0) - 0.37).abs() < 1e-9);
        // 0.7 * 0.1 + 0.3 * 0.5 = 0.22
        assert!((weights.combine(0.1, 0.5) - 0.22).abs() < 1e-9);
    }

    #[test]
    fn test_content_score_affinity_vs_baseline() {
        let weights = RelevanceWeights::default();
        let affinities: HashSet<TopicId> = [TopicId(1)].into();
        assert!((weights.content_score(TopicId(1), &affinities) - 1.0).abs() < f64::EPSILON);
        assert!((weights.content_score(TopicId(2), &affinities) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_content_score_empty_affinities() {
        let weights = RelevanceWeights::default();
        let affinities = HashSet::new();
        assert!((weights.content_score(TopicId(0), &affinities) - 0.5).abs() < f64::EPSILON);
    }
}
