// Interaction reporting handler.
//
// POST /api/interactions — record one view or click for the requesting
// user. The body carries the article's reference and text verbatim so the
// interaction can be re-scored later; the server never refetches the feed
// to resolve an article index.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use super::feed::with_optional_cookie;
use crate::web::{api_error, AppState};

#[derive(Deserialize)]
pub struct InteractionBody {
    /// Stable article reference (URL preferred). Falls back to the title.
    #[serde(default)]
    pub article_ref: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub clicked: bool,
    /// Refit the click model from all stored interactions afterwards.
    #[serde(default)]
    pub refit: bool,
}

/// POST /api/interactions — append one interaction.
pub async fn record_interaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<InteractionBody>,
) -> Response {
    if body.title.is_empty() && body.article_ref.is_empty() {
        return api_error(StatusCode::BAD_REQUEST, "article_ref or title required");
    }

    let (user_id, new_cookie) = super::session_user(&state, &headers);

    let article_ref = if body.article_ref.is_empty() {
        body.title.clone()
    } else {
        body.article_ref.clone()
    };
    let article_text = if body.description.is_empty() {
        body.title.clone()
    } else {
        format!("{} {}", body.title, body.description)
    };

    if let Err(e) = state
        .engine
        .store
        .record_interaction(&user_id, &article_ref, body.clicked, &article_text)
        .await
    {
        tracing::error!(error = %e, user_id = %user_id, "failed to record interaction");
        return api_error(StatusCode::INTERNAL_SERVER_ERROR, "Storage error");
    }

    let click_rate = if body.refit {
        match state.engine.refit().await {
            Ok((_, new_rate)) => Some(new_rate),
            Err(e) => {
                tracing::error!(error = %e, "refit after interaction failed");
                None
            }
        }
    } else {
        None
    };

    let payload = serde_json::json!({
        "status": "recorded",
        "user_id": user_id,
        "clicked": body.clicked,
        "click_rate": click_rate,
    });

    with_optional_cookie(Json(payload).into_response(), new_cookie)
}
