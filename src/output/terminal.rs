// Colored terminal output for ranked feeds, profiles, and the taxonomy.
//
// This module handles all terminal-specific formatting: colors, tables,
// summaries. The main.rs display paths delegate here.

use colored::Colorize;

use crate::db::models::Interaction;
use crate::feed::Article;
use crate::output::truncate_chars;
use crate::ranking::ranker::ScoredArticle;
use crate::topics::taxonomy::Taxonomy;

/// Display a ranked recommendation list with the scores behind each pick.
pub fn display_ranked(user_id: &str, ranked: &[ScoredArticle], taxonomy: &Taxonomy) {
    if ranked.is_empty() {
        println!("No articles to rank. Check the feed or lower the filters.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Recommendations for {user_id} ({} articles) ===", ranked.len()).bold()
    );
    println!();

    // Header
    println!(
        "  {:>4}  {:<44} {:<12} {:>9}  {:>5}",
        "Rank".dimmed(),
        "Title".dimmed(),
        "Topic".dimmed(),
        "Relevance".dimmed(),
        "CTR".dimmed(),
    );
    println!("  {}", "-".repeat(82).dimmed());

    for (i, scored) in ranked.iter().enumerate() {
        let topic_label = taxonomy.label(scored.topic);
        // Affinity picks carry the full content bonus — highlight them
        let topic_colored = if scored.content_score >= 1.0 {
            topic_label.green().to_string()
        } else {
            topic_label.normal().to_string()
        };

        println!(
            "  {:>4}. {:<44} {:<12} {:>9.3}  {:>5.2}",
            i + 1,
            truncate_chars(&scored.article.title, 42),
            topic_colored,
            scored.relevance,
            scored.click_score,
        );
        if !scored.article.url.is_empty() {
            println!("        {}", scored.article.url.dimmed());
        }
    }
    println!();
}

/// Display a plain fetched-article list (no personalization).
pub fn display_articles(articles: &[Article]) {
    if articles.is_empty() {
        println!("No articles in the feed.");
        return;
    }

    println!("\n{}", format!("=== Feed ({} articles) ===", articles.len()).bold());
    println!();

    for (i, article) in articles.iter().enumerate() {
        println!(
            "  {:>3}. {} {}",
            i + 1,
            truncate_chars(&article.title, 60).bold(),
            format!("({})", article.source.name).dimmed(),
        );
        if let Some(description) = &article.description {
            println!("       {}", truncate_chars(description, 76).dimmed());
        }
    }
    println!();
}

/// Display a user's interaction history and engagement stats.
pub fn display_profile(
    user_id: &str,
    history: &[Interaction],
    affinity_labels: &[String],
) {
    println!("\n{}", format!("=== Profile: {user_id} ===").bold());

    let clicks = history.iter().filter(|h| h.clicked).count();
    let views = history.len() - clicks;
    let unique: std::collections::HashSet<&str> =
        history.iter().map(|h| h.article_ref.as_str()).collect();

    println!("  Views:           {views}");
    println!("  Clicks:          {clicks}");
    println!("  Unique articles: {}", unique.len());

    if affinity_labels.is_empty() {
        println!("  Topic affinities: none yet (no clicks recorded)");
    } else {
        println!("  Topic affinities: {}", affinity_labels.join(", ").green());
    }

    if !history.is_empty() {
        println!("\n  Recent interactions:");
        for interaction in history.iter().rev().take(10) {
            let marker = if interaction.clicked {
                "click".green().to_string()
            } else {
                "view ".dimmed().to_string()
            };
            println!(
                "    {} {} {}",
                marker,
                truncate_chars(&interaction.article_ref, 56),
                interaction.recorded_at.dimmed(),
            );
        }
    }
    println!();
}

/// Display the topic taxonomy with its keyword lists.
pub fn display_taxonomy(taxonomy: &Taxonomy) {
    println!(
        "\n{}",
        format!("=== Topic Taxonomy ({} topics) ===", taxonomy.len()).bold()
    );
    println!();

    for (i, topic) in taxonomy.topics.iter().enumerate() {
        println!("  {:>2}. {}", i, topic.label.bold());
        println!("      Keywords: {}", topic.keywords.join(", ").dimmed());
    }

    println!();
    println!(
        "{}",
        "Ties (and no-match texts) assign to the lowest-numbered topic.".dimmed()
    );
}
