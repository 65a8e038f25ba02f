#![cfg(feature = "web")]

// Web API tests — drive the router directly with tower's oneshot.
//
// The feed client is absent (no API key), so /api/feed serves the built-in
// sample articles; identity comes from the signed cookie issued on first
// contact.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use rusqlite::Connection;
use tower::ServiceExt;

use gazette::config::Config;
use gazette::db::schema::create_tables;
use gazette::db::sqlite::SqliteDatabase;
use gazette::db::Database;
use gazette::engine::Engine;
use gazette::web::{build_router, AppState};

const SECRET: &str = "test_secret_32_bytes_long_enough!";

async fn test_state() -> AppState {
    let conn = Connection::open_in_memory().unwrap();
    create_tables(&conn).unwrap();
    let db: Arc<dyn Database> = Arc::new(SqliteDatabase::new(conn));

    let engine = Engine::load(db).await.unwrap();

    let config = Config {
        db_path: ":memory:".to_string(),
        news_api_key: String::new(),
        news_api_url: gazette::feed::DEFAULT_NEWS_API_URL.to_string(),
        news_query: "technology".to_string(),
        session_secret: SECRET.to_string(),
    };

    AppState {
        engine: Arc::new(engine),
        feed: None,
        config: Arc::new(config),
    }
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Extract the `name=value` pair from a Set-Cookie header value.
fn cookie_pair(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("Set-Cookie header")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn health_returns_ok() {
    let app = build_router(test_state().await);

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn feed_serves_ranked_samples_and_issues_identity() {
    let app = build_router(test_state().await);

    let response = app
        .oneshot(Request::get("/api/feed").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // First contact issues a signed identity cookie
    let cookie = cookie_pair(&response);
    assert!(cookie.starts_with("gazette_uid="));

    let json = body_json(response).await;
    assert!(json["user_id"].as_str().unwrap().starts_with("user_"));

    let articles = json["articles"].as_array().unwrap();
    assert_eq!(articles.len(), 5, "all five samples fit in the default top_k");
    assert_eq!(articles[0]["rank"], 1);
    assert!(articles[0]["relevance"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn feed_respects_top_k_param() {
    let app = build_router(test_state().await);

    let response = app
        .oneshot(
            Request::get("/api/feed?top_k=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["articles"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn interaction_then_profile_reflects_click() {
    let state = test_state().await;

    // Record a click (first contact — cookie issued here)
    let body = serde_json::json!({
        "article_ref": "https://example.com/climate-summit",
        "title": "Climate Change Summit Results",
        "description": "World leaders agree on new climate targets.",
        "clicked": true,
    });
    let response = build_router(state.clone())
        .oneshot(
            Request::post("/api/interactions")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = cookie_pair(&response);

    let json = body_json(response).await;
    assert_eq!(json["status"], "recorded");

    // Profile with the same cookie sees the click and the derived affinity
    let response = build_router(state)
        .oneshot(
            Request::get("/api/profile")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["stats"]["total_clicks"], 1);
    assert_eq!(json["stats"]["total_views"], 0);
    assert_eq!(json["stats"]["unique_articles"], 1);
    let affinities = json["affinities"].as_array().unwrap();
    assert_eq!(affinities.len(), 1);
    assert_eq!(affinities[0], "Climate");
}

#[tokio::test]
async fn interaction_without_identifiers_is_rejected() {
    let app = build_router(test_state().await);

    let body = serde_json::json!({
        "article_ref": "",
        "title": "",
        "clicked": true,
    });
    let response = app
        .oneshot(
            Request::post("/api/interactions")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn interaction_with_refit_returns_new_rate() {
    let app = build_router(test_state().await);

    let body = serde_json::json!({
        "title": "Stock Market Trends",
        "clicked": true,
        "refit": true,
    });
    let response = app
        .oneshot(
            Request::post("/api/interactions")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    // One interaction, clicked — the refit rate is 1.0
    assert!((json["click_rate"].as_f64().unwrap() - 1.0).abs() < 1e-9);
}
