use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::sync::Arc;
use tracing::{info, warn};

use gazette::config;

/// Gazette: personalized news ranking.
///
/// Ranks candidate articles for a user by blending a click-rate estimate
/// with topic affinity from past engagement, then selects a diverse top-N
/// with Maximal Marginal Relevance.
#[derive(Parser)]
#[command(name = "gazette", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database and persist the default models
    Init,

    /// Show the topic taxonomy
    Topics,

    /// Fetch the news feed without personalization
    Fetch {
        /// Search query (default: GAZETTE_NEWS_QUERY or "technology")
        #[arg(long)]
        query: Option<String>,

        /// Max articles to fetch (default: 20)
        #[arg(long, default_value = "20")]
        count: u32,
    },

    /// Rank the current feed for a user
    Rank {
        /// The user to personalize for
        user: String,

        /// How many articles to select
        #[arg(long, default_value = "10")]
        top_k: usize,

        /// Relevance/diversity interpolation weight (0.0 - 1.0)
        #[arg(long, default_value = "0.5")]
        lambda: f64,

        /// Search query (default: GAZETTE_NEWS_QUERY or "technology")
        #[arg(long)]
        query: Option<String>,
    },

    /// Record a view or click interaction
    Record {
        /// The user who interacted
        user: String,

        /// Article title
        #[arg(long)]
        title: String,

        /// Article description
        #[arg(long, default_value = "")]
        description: String,

        /// Article URL (used as the stable reference; falls back to title)
        #[arg(long, default_value = "")]
        url: String,

        /// Mark the interaction as a click (default: view)
        #[arg(long)]
        clicked: bool,

        /// Refit the click model from all stored interactions afterwards
        #[arg(long)]
        refit: bool,
    },

    /// Show a user's engagement profile
    Profile {
        /// The user to inspect
        user: String,
    },

    /// Refit the click model from all stored interactions
    Refit,

    /// Show system status (DB stats, model state, taxonomy)
    Status,

    /// Start the JSON API server
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gazette=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing Gazette database...");
            let config = config::Config::load()?;
            let db = gazette::db::initialize_sqlite(&config.db_path)?;
            let table_count = db.table_count().await?;

            // Persist the default models so they can be inspected and
            // edited in the database from day one.
            let engine = gazette::engine::Engine::load(db.clone()).await?;
            engine.persist_models().await?;

            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nGazette is ready. Next step: rank the sample feed:");
            println!("  cargo run -- rank alice");
        }

        Commands::Topics => {
            let config = config::Config::load()?;
            let db = open_database(&config)?;
            let engine = gazette::engine::Engine::load(db).await?;
            gazette::output::terminal::display_taxonomy(&engine.taxonomy);
        }

        Commands::Fetch { query, count } => {
            let config = config::Config::load()?;
            let query = query.unwrap_or_else(|| config.news_query.clone());
            let articles = fetch_candidates(&config, &query, count).await;
            gazette::output::terminal::display_articles(&articles);
        }

        Commands::Rank {
            user,
            top_k,
            lambda,
            query,
        } => {
            let config = config::Config::load()?;
            let db = open_database(&config)?;
            let engine = gazette::engine::Engine::load(db).await?;

            let query = query.unwrap_or_else(|| config.news_query.clone());
            let articles = fetch_candidates(&config, &query, 20).await;

            let lambda = lambda.clamp(0.0, 1.0);
            let ranked = engine
                .ranker()
                .rank_scored(&user, &articles, top_k, lambda)
                .await?;

            gazette::output::terminal::display_ranked(&user, &ranked, &engine.taxonomy);
        }

        Commands::Record {
            user,
            title,
            description,
            url,
            clicked,
            refit,
        } => {
            let config = config::Config::load()?;
            let db = open_database(&config)?;
            let engine = gazette::engine::Engine::load(db).await?;

            let article_ref = if url.is_empty() { title.clone() } else { url };
            let article_text = if description.is_empty() {
                title.clone()
            } else {
                format!("{title} {description}")
            };

            engine
                .store
                .record_interaction(&user, &article_ref, clicked, &article_text)
                .await?;

            let kind = if clicked { "click" } else { "view" };
            println!("Recorded {kind} for {user}: {article_ref}");

            if refit {
                let (old_rate, new_rate) = engine.refit().await?;
                println!("Click model refit: {old_rate:.4} -> {new_rate:.4}");
            }
        }

        Commands::Profile { user } => {
            let config = config::Config::load()?;
            let db = open_database(&config)?;
            let engine = gazette::engine::Engine::load(db).await?;

            let history = engine.store.history(&user).await?;
            let assigner = engine.assigner();
            let affinities = engine.store.topic_affinities(&user, &assigner).await?;
            let mut labels: Vec<String> = affinities
                .iter()
                .map(|&t| engine.taxonomy.label(t).to_string())
                .collect();
            labels.sort();

            gazette::output::terminal::display_profile(&user, &history, &labels);
        }

        Commands::Refit => {
            let config = config::Config::load()?;
            let db = open_database(&config)?;
            let engine = gazette::engine::Engine::load(db).await?;

            let (old_rate, new_rate) = engine.refit().await?;
            println!("{}", "Click model refit.".bold());
            println!("  Old rate: {old_rate:.4}");
            println!("  New rate: {new_rate:.4}");
        }

        Commands::Status => {
            let config = config::Config::load()?;
            let db = open_database(&config)?;
            gazette::status::show(&db, &config.db_path).await?;
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let config = config::Config::load()?;
            config.require_session_secret()?;
            let db = open_database(&config)?;

            gazette::web::run_server(config, db, port, &bind).await?;
        }
    }

    Ok(())
}

/// Open the database, creating it on first use.
///
/// Initialization is idempotent, so every command can bootstrap the store —
/// an empty store just means "no personalization data yet".
fn open_database(config: &config::Config) -> Result<Arc<dyn gazette::db::Database>> {
    gazette::db::initialize_sqlite(&config.db_path)
}

/// Fetch candidate articles, degrading to the built-in samples when no API
/// key is configured or the fetch fails. The ranking core never sees the
/// difference.
async fn fetch_candidates(
    config: &config::Config,
    query: &str,
    count: u32,
) -> Vec<gazette::feed::Article> {
    if config.news_api_key.is_empty() {
        info!("NEWS_API_KEY not set, using sample articles");
        return gazette::feed::sample_articles();
    }

    let client = match gazette::feed::NewsFeedClient::new(&config.news_api_url, &config.news_api_key)
    {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "failed to build feed client, using sample articles");
            return gazette::feed::sample_articles();
        }
    };

    match client.fetch(query, 7, count).await {
        Ok(articles) if !articles.is_empty() => articles,
        Ok(_) => {
            warn!(query, "feed returned no articles, using sample articles");
            gazette::feed::sample_articles()
        }
        Err(e) => {
            warn!(error = %e, "feed fetch failed, using sample articles");
            gazette::feed::sample_articles()
        }
    }
}
