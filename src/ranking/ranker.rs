// The ranker — combined scoring plus MMR selection over one candidate set.
//
// One rank call is self-contained: it reads the user's topic affinities
// from the engagement store, scores every candidate, fits a fresh TF-IDF
// space over exactly this candidate set, and runs the MMR loop. Nothing is
// cached across calls, so repeated calls with no intervening writes are
// byte-for-byte reproducible.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tracing::debug;

use crate::engagement::EngagementStore;
use crate::feed::Article;
use crate::ranking::mmr::mmr_select;
use crate::ranking::vectorize::TfIdfVectorizer;
use crate::scoring::ctr::ClickModel;
use crate::scoring::relevance::RelevanceWeights;
use crate::topics::assigner::KeywordAssigner;
use crate::topics::taxonomy::TopicId;
use crate::topics::traits::TopicAssigner;

/// A ranked article with the scores that put it there.
///
/// Ephemeral — produced fresh per ranking call for display layers, never
/// persisted.
#[derive(Debug, Clone)]
pub struct ScoredArticle {
    pub article: Article,
    pub topic: TopicId,
    pub click_score: f64,
    pub content_score: f64,
    pub relevance: f64,
}

/// Diversity-aware article ranker.
///
/// Holds shared handles to the taxonomy-backed assigner, the click model,
/// and the engagement store; cheap to construct per request.
pub struct Ranker {
    assigner: KeywordAssigner,
    click: Arc<RwLock<ClickModel>>,
    store: EngagementStore,
    weights: RelevanceWeights,
    vectorizer: TfIdfVectorizer,
}

impl Ranker {
    pub fn new(
        assigner: KeywordAssigner,
        click: Arc<RwLock<ClickModel>>,
        store: EngagementStore,
        weights: RelevanceWeights,
    ) -> Self {
        Self {
            assigner,
            click,
            store,
            weights,
            vectorizer: TfIdfVectorizer::default(),
        }
    }

    /// Rank candidates for a user and return the selected articles in rank
    /// order. Returns `min(top_k, candidates)` articles; empty input or
    /// `top_k == 0` yields an empty result, never an error.
    pub async fn rank(
        &self,
        user_id: &str,
        candidates: &[Article],
        top_k: usize,
        lambda: f64,
    ) -> Result<Vec<Article>> {
        let scored = self.rank_scored(user_id, candidates, top_k, lambda).await?;
        Ok(scored.into_iter().map(|s| s.article).collect())
    }

    /// Like [`rank`](Self::rank), but keeps each pick's topic and scores.
    pub async fn rank_scored(
        &self,
        user_id: &str,
        candidates: &[Article],
        top_k: usize,
        lambda: f64,
    ) -> Result<Vec<ScoredArticle>> {
        if candidates.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }

        let texts: Vec<String> = candidates.iter().map(|a| a.text()).collect();

        // Uniform click scores from the current model snapshot. The read
        // lock is dropped before any await so refits never block ranking.
        let click_scores = {
            let model = self.click.read().await;
            model.score_batch(&texts)
        };

        let topics = self.assigner.assign_batch(&texts);
        let affinities = self
            .store
            .topic_affinities(user_id, &self.assigner)
            .await?;

        debug!(
            user_id = user_id,
            candidates = candidates.len(),
            affinities = affinities.len(),
            "scoring candidates"
        );

        let content_scores: Vec<f64> = topics
            .iter()
            .map(|&t| self.weights.content_score(t, &affinities))
            .collect();

        let relevance: Vec<f64> = click_scores
            .iter()
            .zip(&content_scores)
            .map(|(&ctr, &content)| self.weights.combine(ctr, content))
            .collect();

        // Fresh vector space over exactly this candidate set
        let vectors = self.vectorizer.vectorize(&texts);

        let order = mmr_select(&relevance, &vectors, top_k, lambda);

        Ok(order
            .into_iter()
            .map(|idx| ScoredArticle {
                article: candidates[idx].clone(),
                topic: topics[idx],
                click_score: click_scores[idx],
                content_score: content_scores[idx],
                relevance: relevance[idx],
            })
            .collect())
    }
}
