// Ranked feed handler.
//
// GET /api/feed — fetch candidates, rank them for the requesting user,
// return the selection in rank order with the scores behind each pick.
//
// Optional query params: ?top_k= (default 10, capped), ?lambda= (0.0-1.0),
// ?q= (feed search query).

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::warn;

use crate::feed::{sample_articles, Article};
use crate::ranking::mmr::DEFAULT_DIVERSITY_LAMBDA;
use crate::web::{api_error, AppState};

/// Cap on requested feed size, mirroring the feed fetch page size.
const MAX_TOP_K: usize = 50;

#[derive(Deserialize, Default)]
pub struct FeedQuery {
    pub top_k: Option<usize>,
    pub lambda: Option<f64>,
    /// Feed search query override
    pub q: Option<String>,
}

/// GET /api/feed — personalized article ranking.
pub async fn get_feed(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<FeedQuery>,
) -> Response {
    let (user_id, new_cookie) = super::session_user(&state, &headers);

    let query = params
        .q
        .unwrap_or_else(|| state.config.news_query.clone());
    let candidates = fetch_candidates(&state, &query).await;

    let top_k = params.top_k.unwrap_or(10).min(MAX_TOP_K);
    let lambda = params
        .lambda
        .unwrap_or(DEFAULT_DIVERSITY_LAMBDA)
        .clamp(0.0, 1.0);

    let ranked = match state
        .engine
        .ranker()
        .rank_scored(&user_id, &candidates, top_k, lambda)
        .await
    {
        Ok(ranked) => ranked,
        Err(e) => {
            tracing::error!(error = %e, user_id = %user_id, "ranking failed");
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, "Ranking failed");
        }
    };

    let articles: Vec<serde_json::Value> = ranked
        .iter()
        .enumerate()
        .map(|(i, scored)| {
            serde_json::json!({
                "rank": i + 1,
                "title": scored.article.title,
                "description": scored.article.description,
                "url": scored.article.url,
                "source": scored.article.source.name,
                "published_at": scored.article.published_at,
                "topic": state.engine.taxonomy.label(scored.topic),
                "relevance": scored.relevance,
                "click_score": scored.click_score,
            })
        })
        .collect();

    let payload = serde_json::json!({
        "user_id": user_id,
        "lambda": lambda,
        "articles": articles,
    });

    with_optional_cookie(Json(payload).into_response(), new_cookie)
}

/// Fetch candidates from the configured feed, degrading to samples on any
/// trouble. Feed failure never reaches the caller.
async fn fetch_candidates(state: &AppState, query: &str) -> Vec<Article> {
    let Some(feed) = &state.feed else {
        return sample_articles();
    };

    match feed.fetch(query, 7, MAX_TOP_K as u32).await {
        Ok(articles) if !articles.is_empty() => articles,
        Ok(_) => {
            warn!(query, "feed returned no articles, serving samples");
            sample_articles()
        }
        Err(e) => {
            warn!(error = %e, "feed fetch failed, serving samples");
            sample_articles()
        }
    }
}

/// Attach a Set-Cookie header when a new identity was issued.
pub(crate) fn with_optional_cookie(mut response: Response, cookie: Option<String>) -> Response {
    if let Some(cookie) = cookie {
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }
    response
}
