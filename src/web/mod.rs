// Web server — Axum JSON API for the ranked feed.
//
// Three surfaces: the personalized feed, interaction reporting, and a
// per-user profile. There is no login — identity is a per-browser user id
// carried in an HMAC-signed cookie, issued on first contact. The signature
// only prevents users from forging each other's ids; it is not
// authentication.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::db::Database;
use crate::engine::Engine;
use crate::feed::NewsFeedClient;

pub mod handlers;
pub mod session;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
    /// None when NEWS_API_KEY is unset — handlers fall back to samples.
    pub feed: Option<Arc<NewsFeedClient>>,
    pub config: Arc<Config>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(
    config: Config,
    db: Arc<dyn Database>,
    port: u16,
    bind: &str,
) -> Result<()> {
    let engine = Engine::load(db).await?;

    let feed = if config.news_api_key.is_empty() {
        info!("NEWS_API_KEY not set, serving sample articles");
        None
    } else {
        match NewsFeedClient::new(&config.news_api_url, &config.news_api_key) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                warn!(error = %e, "failed to build feed client, serving sample articles");
                None
            }
        }
    };

    let state = AppState {
        engine: Arc::new(engine),
        feed,
        config: Arc::new(config),
    };

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Gazette API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/feed", get(handlers::feed::get_feed))
        .route(
            "/api/interactions",
            post(handlers::interactions::record_interaction),
        )
        .route("/api/profile", get(handlers::profile::get_profile))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check — always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
