// Topic taxonomy — the fixed set of topics an article can be assigned to.
//
// Topics are static configuration: loaded once at startup, read everywhere,
// only replaced wholesale by reconfiguration. Stored as a single JSON value
// in model_state so the structure can evolve without schema migrations.

use serde::{Deserialize, Serialize};

/// Index of a topic within the configured taxonomy.
///
/// Topic identity is positional — the taxonomy's order is part of its
/// contract, because assignment tie-breaks resolve to the lowest index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TopicId(pub usize);

impl std::fmt::Display for TopicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "topic-{}", self.0)
    }
}

/// A single topic: a human-readable label plus the keywords that signal it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub label: String,
    /// Keywords in configured order. Matching is case-insensitive substring
    /// containment, so short keywords ("ai", "tech") match inside words.
    pub keywords: Vec<String>,
}

/// The full ordered topic set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Taxonomy {
    pub topics: Vec<Topic>,
}

impl Default for Taxonomy {
    /// The built-in five-topic taxonomy used when no persisted taxonomy exists.
    fn default() -> Self {
        Self {
            topics: vec![
                topic("Tech & AI", &["ai", "machine", "learning", "technology"]),
                topic("Climate", &["climate", "environment", "change", "global"]),
                topic("Markets", &["stock", "market", "finance", "economy"]),
                topic("Space", &["space", "nasa", "exploration", "mars"]),
                topic("Education", &["education", "school", "learning", "tech"]),
            ],
        }
    }
}

fn topic(label: &str, keywords: &[&str]) -> Topic {
    Topic {
        label: label.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

impl Taxonomy {
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn get(&self, id: TopicId) -> Option<&Topic> {
        self.topics.get(id.0)
    }

    /// Label for a topic id, or "?" for an out-of-range id (stale persisted
    /// data after a taxonomy shrink).
    pub fn label(&self, id: TopicId) -> &str {
        self.get(id).map(|t| t.label.as_str()).unwrap_or("?")
    }

    /// The topic assigned when nothing matches: the lowest-indexed one.
    pub fn default_topic(&self) -> TopicId {
        TopicId(0)
    }
}
