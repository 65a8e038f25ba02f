// News feed client — article fetching from NewsAPI, with sample fallback.
//
// The ranking core never talks to this module directly; it ranks whatever
// candidate list it is handed. Callers (CLI, web handlers) fetch here and
// degrade to `sample_articles()` when no API key is configured or the
// fetch fails — fetch trouble is logged, never surfaced to the ranking
// path.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default NewsAPI endpoint root.
pub const DEFAULT_NEWS_API_URL: &str = "https://newsapi.org/v2";

/// One candidate news article, in NewsAPI record shape.
///
/// Identity within a ranking call is positional; articles are never
/// persisted by the core. `description` and `content` are optional because
/// NewsAPI returns null for paywalled or truncated records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub source: Source,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub published_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub name: String,
}

impl Article {
    /// The text the ranking pipeline scores: title + description.
    /// A missing description contributes the empty string.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.description.as_deref().unwrap_or(""))
            .trim_end()
            .to_string()
    }

    /// The stable external reference recorded with interactions:
    /// the URL when present, the title otherwise.
    pub fn reference(&self) -> &str {
        if self.url.is_empty() {
            &self.title
        } else {
            &self.url
        }
    }
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    status: String,
    #[serde(default)]
    articles: Vec<Article>,
}

/// Thin reqwest wrapper for the NewsAPI `everything` endpoint.
pub struct NewsFeedClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl NewsFeedClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("gazette/0.1 (news-ranking)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Fetch recent articles matching `query` from the last `days` days,
    /// newest first.
    pub async fn fetch(&self, query: &str, days: i64, page_size: u32) -> Result<Vec<Article>> {
        let url = format!("{}/everything", self.base_url);
        let from = (Utc::now() - Duration::days(days))
            .format("%Y-%m-%d")
            .to_string();
        let page_size = page_size.to_string();

        debug!(query, from = %from, "fetching news feed");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("from", &from),
                ("sortBy", "publishedAt"),
                ("pageSize", &page_size),
                ("apiKey", &self.api_key),
            ])
            .send()
            .await
            .context("News feed request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("News feed returned {status}: {body}");
        }

        let parsed: EverythingResponse = response
            .json()
            .await
            .context("Failed to deserialize news feed response")?;

        if parsed.status != "ok" {
            anyhow::bail!("News feed returned status {:?}", parsed.status);
        }

        Ok(parsed.articles)
    }
}

/// Built-in sample articles used when no API key is configured or a fetch
/// fails. Covers each topic of the default taxonomy so the demo ranking
/// has something to differentiate.
pub fn sample_articles() -> Vec<Article> {
    let demo = [
        (
            "Tech News",
            "AI Advances in Healthcare",
            "New AI models are revolutionizing medical diagnostics.",
            "Artificial intelligence is making significant strides in healthcare...",
            "https://example.com/ai-healthcare",
            1,
        ),
        (
            "Environment Daily",
            "Climate Change Summit Results",
            "World leaders agree on new climate targets.",
            "The recent summit concluded with ambitious goals...",
            "https://example.com/climate-summit",
            2,
        ),
        (
            "Finance Today",
            "Stock Market Trends",
            "Analysis of current market conditions.",
            "The stock market has shown volatility recently...",
            "https://example.com/stock-market",
            3,
        ),
        (
            "Space News",
            "Space Exploration Update",
            "NASA announces new Mars mission.",
            "NASA's latest mission to Mars is set to launch...",
            "https://example.com/space-exploration",
            4,
        ),
        (
            "EduTech Magazine",
            "Education Technology Innovations",
            "How edtech is transforming learning.",
            "Educational technology continues to evolve...",
            "https://example.com/edtech",
            5,
        ),
    ];

    demo.iter()
        .map(|(source, title, description, content, url, days_ago)| Article {
            source: Source {
                name: source.to_string(),
            },
            title: title.to_string(),
            description: Some(description.to_string()),
            content: Some(content.to_string()),
            url: url.to_string(),
            published_at: (Utc::now() - Duration::days(*days_ago)).to_rfc3339(),
        })
        .collect()
}
