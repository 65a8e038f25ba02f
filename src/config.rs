use std::env;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// Everything has a workable default — a freshly cloned checkout runs
/// against sample articles with no configuration at all. The .env file is
/// loaded automatically at startup via dotenvy.
pub struct Config {
    pub db_path: String,
    /// NewsAPI key. Empty means "no key": the feed degrades to the
    /// built-in sample articles instead of fetching.
    pub news_api_key: String,
    pub news_api_url: String,
    /// Default search query for feed fetches.
    pub news_query: String,
    /// Secret for HMAC-signing the per-browser user-id cookie
    /// (GAZETTE_SESSION_SECRET env var).
    #[cfg(feature = "web")]
    pub session_secret: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        #[cfg(feature = "web")]
        let session_secret = env::var("GAZETTE_SESSION_SECRET").unwrap_or_default();

        Ok(Self {
            db_path: env::var("GAZETTE_DB_PATH").unwrap_or_else(|_| "./gazette.db".to_string()),
            news_api_key: env::var("NEWS_API_KEY").unwrap_or_default(),
            news_api_url: env::var("NEWS_API_URL")
                .unwrap_or_else(|_| crate::feed::DEFAULT_NEWS_API_URL.to_string()),
            news_query: env::var("GAZETTE_NEWS_QUERY").unwrap_or_else(|_| "technology".to_string()),
            #[cfg(feature = "web")]
            session_secret,
        })
    }

    /// Check that the session secret is configured.
    /// Call this before starting the web server — unsigned user-id cookies
    /// would let anyone read anyone else's history.
    #[cfg(feature = "web")]
    pub fn require_session_secret(&self) -> Result<()> {
        if self.session_secret.is_empty() {
            anyhow::bail!(
                "GAZETTE_SESSION_SECRET not set. Add it to your .env file.\n\
                 Any long random string works: openssl rand -hex 32"
            );
        }
        Ok(())
    }
}
