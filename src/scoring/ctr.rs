// Click-through model — a single scalar click-rate estimate.
//
// This is deliberately not a predictive model: score_batch broadcasts the
// same current rate for every input text regardless of content. It stands
// in for a real per-article CTR predictor so the surrounding pipeline
// (refit from stored interactions, atomic swap, persistence) is already in
// its final shape when one arrives.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Click rate assumed before any model has been fit or loaded.
pub const DEFAULT_CLICK_RATE: f64 = 0.1;

/// Bootstrap rates used when fitting with no interaction data at all.
/// Their mean (0.25) makes the system demoable with an empty store.
const BOOTSTRAP_RATES: [f64; 5] = [0.3, 0.2, 0.4, 0.1, 0.25];

/// The entire model state is one scalar; refits replace it wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClickModel {
    rate: f64,
}

impl Default for ClickModel {
    fn default() -> Self {
        Self {
            rate: DEFAULT_CLICK_RATE,
        }
    }
}

impl ClickModel {
    /// Rebuild a persisted model from its stored scalar.
    pub fn from_rate(rate: f64) -> Self {
        Self { rate }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Fit a new model from observed click labels (1 = clicked, 0 = viewed).
    ///
    /// Non-empty labels set the rate to their arithmetic mean. An empty
    /// label set falls back to the bootstrap rates so a freshly initialized
    /// system still produces sensible scores.
    pub fn fit(labels: &[u8]) -> Self {
        let rate = if labels.is_empty() {
            debug!("no training labels, fitting click model from bootstrap set");
            mean(&BOOTSTRAP_RATES)
        } else {
            let sum: f64 = labels.iter().map(|&l| f64::from(l)).sum();
            sum / labels.len() as f64
        };
        Self { rate }
    }

    /// Score a batch of article texts.
    ///
    /// Content-insensitive by design: every text receives the current rate.
    pub fn score_batch(&self, texts: &[String]) -> Vec<f64> {
        vec![self.rate; texts.len()]
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
