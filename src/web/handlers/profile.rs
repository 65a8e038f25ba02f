// User profile handler.
//
// GET /api/profile — engagement stats, derived topic affinities, and the
// ten most recent interactions for the requesting user.

use std::collections::HashSet;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::feed::with_optional_cookie;
use crate::topics::traits::TopicAssigner as _;
use crate::web::{api_error, AppState};

/// GET /api/profile — the requesting user's engagement profile.
pub async fn get_profile(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (user_id, new_cookie) = super::session_user(&state, &headers);

    let history = match state.engine.store.history(&user_id).await {
        Ok(history) => history,
        Err(e) => {
            tracing::error!(error = %e, user_id = %user_id, "failed to load history");
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, "Storage error");
        }
    };

    let assigner = state.engine.assigner();
    let affinities = match state
        .engine
        .store
        .topic_affinities(&user_id, &assigner)
        .await
    {
        Ok(affinities) => affinities,
        Err(e) => {
            tracing::error!(error = %e, user_id = %user_id, "failed to derive affinities");
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, "Storage error");
        }
    };

    let mut affinity_labels: Vec<&str> = affinities
        .iter()
        .map(|&t| state.engine.taxonomy.label(t))
        .collect();
    affinity_labels.sort_unstable();

    let clicks = history.iter().filter(|h| h.clicked).count();
    let unique: HashSet<&str> = history.iter().map(|h| h.article_ref.as_str()).collect();

    let recent: Vec<serde_json::Value> = history
        .iter()
        .rev()
        .take(10)
        .map(|h| {
            serde_json::json!({
                "article_ref": h.article_ref,
                "clicked": h.clicked,
                "topic": state.engine.taxonomy.label(assigner.assign(&h.article_text)),
                "recorded_at": h.recorded_at,
            })
        })
        .collect();

    let payload = serde_json::json!({
        "user_id": user_id,
        "stats": {
            "total_views": history.len() - clicks,
            "total_clicks": clicks,
            "unique_articles": unique.len(),
        },
        "affinities": affinity_labels,
        "recent": recent,
    });

    with_optional_cookie(Json(payload).into_response(), new_cookie)
}
