// Per-call TF-IDF vector space for candidate similarity.
//
// The vectorizer is fit fresh on exactly the candidate set of one ranking
// call — candidate sets differ call to call, and a vocabulary carried over
// from a previous call would silently degrade similarity quality. Vectors
// are sparse term-weight maps; cosine similarity over them is the
// redundancy signal for MMR selection.
//
// Ordered maps (BTreeMap) keep term iteration stable, so repeated calls on
// the same candidates sum in the same order and produce byte-identical
// scores.

use std::collections::{BTreeMap, HashSet};

use stop_words::{get, LANGUAGE};

/// A sparse term-weight vector for one document.
pub type SparseVector = BTreeMap<String, f64>;

/// TF-IDF vectorizer over a single candidate set.
pub struct TfIdfVectorizer {
    /// Vocabulary cap: keep the most document-frequent terms when the
    /// candidate set produces more distinct terms than this.
    pub max_features: usize,
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self { max_features: 1000 }
    }
}

impl TfIdfVectorizer {
    /// Fit on the given texts and return one L2-normalized vector per text.
    ///
    /// Empty or stop-word-only texts produce the empty (all-zero) vector;
    /// their similarity to anything is 0, so they never block other
    /// candidates' diversity but earn no similarity signal themselves.
    pub fn vectorize(&self, texts: &[String]) -> Vec<SparseVector> {
        let stop: HashSet<String> = get(LANGUAGE::English).into_iter().collect();

        let docs: Vec<Vec<String>> = texts.iter().map(|t| tokenize(t, &stop)).collect();

        // Document frequency per term
        let mut df: BTreeMap<&str, usize> = BTreeMap::new();
        for doc in &docs {
            let unique: HashSet<&str> = doc.iter().map(|t| t.as_str()).collect();
            for term in unique {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        // Cap the vocabulary at max_features, keeping the most frequent
        // terms. Ties break alphabetically so the cut is deterministic.
        let vocabulary: HashSet<&str> = if df.len() > self.max_features {
            let mut terms: Vec<(&str, usize)> = df.iter().map(|(t, c)| (*t, *c)).collect();
            terms.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
            terms
                .into_iter()
                .take(self.max_features)
                .map(|(t, _)| t)
                .collect()
        } else {
            df.keys().copied().collect()
        };

        let n_docs = docs.len() as f64;

        docs.iter()
            .map(|doc| {
                // Raw term counts within this document
                let mut counts: BTreeMap<&str, f64> = BTreeMap::new();
                for term in doc {
                    if vocabulary.contains(term.as_str()) {
                        *counts.entry(term.as_str()).or_insert(0.0) += 1.0;
                    }
                }

                // Smoothed IDF: ln((1 + n) / (1 + df)) + 1
                let mut vector: SparseVector = counts
                    .into_iter()
                    .map(|(term, tf)| {
                        let term_df = df.get(term).copied().unwrap_or(0) as f64;
                        let idf = ((1.0 + n_docs) / (1.0 + term_df)).ln() + 1.0;
                        (term.to_string(), tf * idf)
                    })
                    .collect();

                normalize(&mut vector);
                vector
            })
            .collect()
    }
}

/// Lowercase, split on non-alphanumeric boundaries, drop one-character
/// tokens and stop words.
fn tokenize(text: &str, stop: &HashSet<String>) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2)
        .filter(|t| !stop.contains(*t))
        .map(|t| t.to_string())
        .collect()
}

/// Scale a vector to unit L2 norm (no-op for the zero vector).
fn normalize(vector: &mut SparseVector) {
    let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm > f64::EPSILON {
        for weight in vector.values_mut() {
            *weight /= norm;
        }
    }
}

/// Cosine similarity between two sparse vectors.
///
/// Returns 0.0 when either vector is (near) zero — empty texts never
/// register as similar to anything.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(term, wa)| b.get(term).map(|wb| wa * wb))
        .sum();

    let norm_a = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b = b.values().map(|w| w * w).sum::<f64>().sqrt();

    if norm_a < f64::EPSILON || norm_b < f64::EPSILON {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
