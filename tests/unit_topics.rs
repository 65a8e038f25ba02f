// Unit tests for keyword topic assignment.
//
// Exercises the assignment contract against the default taxonomy:
// substring matching, strict-majority wins, deterministic tie-breaking,
// and order-preserving batch assignment.

use std::sync::Arc;

use gazette::topics::assigner::KeywordAssigner;
use gazette::topics::taxonomy::{Taxonomy, Topic, TopicId};
use gazette::topics::traits::TopicAssigner;

fn default_assigner() -> KeywordAssigner {
    KeywordAssigner::new(Arc::new(Taxonomy::default()))
}

// ============================================================
// Tie-breaking
// ============================================================

#[test]
fn empty_text_assigns_lowest_indexed_topic() {
    let assigner = default_assigner();
    assert_eq!(assigner.assign(""), TopicId(0));
}

#[test]
fn whitespace_text_assigns_lowest_indexed_topic() {
    let assigner = default_assigner();
    assert_eq!(assigner.assign("   \t\n"), TopicId(0));
}

#[test]
fn unmatched_text_assigns_lowest_indexed_topic() {
    let assigner = default_assigner();
    assert_eq!(assigner.assign("penguins enjoy herring"), TopicId(0));
}

#[test]
fn equal_counts_assign_earlier_topic() {
    // "technology" hits Tech & AI directly and contains "tech" (Education):
    // one keyword each, so the earlier topic wins.
    let assigner = default_assigner();
    assert_eq!(assigner.assign("technology"), TopicId(0));
}

#[test]
fn shared_keyword_resolves_to_earlier_topic() {
    // "learning" belongs to both Tech & AI (index 0) and Education (index 4)
    let assigner = default_assigner();
    assert_eq!(assigner.assign("learning outcomes"), TopicId(0));
}

// ============================================================
// Matching semantics
// ============================================================

#[test]
fn keywords_match_as_substrings() {
    // "mars" matches inside "marsquake" — substring containment, not
    // word-boundary matching
    let assigner = default_assigner();
    assert_eq!(assigner.assign("marsquake detected by probe"), TopicId(3));
}

#[test]
fn matching_ignores_case() {
    let assigner = default_assigner();
    assert_eq!(assigner.assign("CLIMATE Change And The ENVIRONMENT"), TopicId(1));
}

#[test]
fn strictly_higher_count_beats_earlier_topic() {
    // "global" alone hits Climate; "stock" + "market" + "economy" hit
    // Markets three times, so Markets wins despite its higher index.
    let assigner = default_assigner();
    assert_eq!(
        assigner.assign("global stock market economy report"),
        TopicId(2)
    );
}

#[test]
fn each_keyword_counts_once() {
    // Repeating a single keyword shouldn't outvote two distinct keywords
    let assigner = default_assigner();
    assert_eq!(
        assigner.assign("climate change: stock stock stock"),
        TopicId(1)
    );
}

// ============================================================
// Batch assignment
// ============================================================

#[test]
fn batch_matches_per_item_assignment() {
    let assigner = default_assigner();
    let texts = vec![
        "nasa launches mars probe".to_string(),
        "".to_string(),
        "school education funding".to_string(),
        "machine learning technology".to_string(),
    ];
    let batch = assigner.assign_batch(&texts);
    let individual: Vec<TopicId> = texts.iter().map(|t| assigner.assign(t)).collect();
    assert_eq!(batch, individual);
    assert_eq!(batch, vec![TopicId(3), TopicId(0), TopicId(4), TopicId(0)]);
}

#[test]
fn batch_of_empty_input_is_empty() {
    let assigner = default_assigner();
    assert!(assigner.assign_batch(&[]).is_empty());
}

// ============================================================
// Custom taxonomies
// ============================================================

#[test]
fn single_topic_taxonomy_always_assigns_it() {
    let taxonomy = Taxonomy {
        topics: vec![Topic {
            label: "Everything".to_string(),
            keywords: vec!["anything".to_string()],
        }],
    };
    let assigner = KeywordAssigner::new(Arc::new(taxonomy));
    assert_eq!(assigner.assign("no matches here"), TopicId(0));
    assert_eq!(assigner.assign("anything at all"), TopicId(0));
}
