//! Command handlers for the CLI.

use anyhow::Context;
use newslens_core::{AppConfig, ArticleReference, EnrichedArticle, StageSet};
use newslens_enrich::Enricher;
use newslens_feed::{FeedQuery, NewsApiClient};
use serde::Serialize;

#[derive(Debug)]
pub(crate) struct SearchArgs {
    pub query: Option<String>,
    pub language: Option<String>,
    pub page_size: Option<u32>,
    pub page: u32,
    pub stages: StageSet,
    pub enrich_top: Option<usize>,
}

#[derive(Debug, Serialize)]
struct SearchOutput {
    total_results: u64,
    articles: Vec<EnrichedArticle>,
}

/// Fetch one page of headlines and enrich the leading results.
///
/// # Errors
///
/// Returns an error if the feed client cannot be built or the provider
/// request fails. Per-article enrichment failures degrade to fallbacks.
pub(crate) async fn run_search(config: &AppConfig, args: SearchArgs) -> anyhow::Result<()> {
    let feed = NewsApiClient::new(&config.feed).context("building headline feed client")?;
    let enricher = Enricher::from_config(config).context("building enrichment pipeline")?;

    let query = feed_query(config, args.query, args.language, args.page_size, args.page);
    let page = feed
        .fetch_headlines(&query)
        .await
        .context("fetching headlines")?;

    let enrich_top = args.enrich_top.unwrap_or(config.enrich_top);
    tracing::info!(
        results = page.articles.len(),
        stages = %args.stages,
        enrich_top,
        "enriching headlines"
    );
    let articles = enricher
        .enrich_leading(page.articles, args.stages, enrich_top)
        .await;

    print_json(&SearchOutput {
        total_results: page.total_results,
        articles,
    })
}

/// Enrich a single article addressed only by URL.
///
/// # Errors
///
/// Returns an error if the enrichment pipeline cannot be built.
pub(crate) async fn run_enrich(config: &AppConfig, url: &str, stages: StageSet) -> anyhow::Result<()> {
    let enricher = Enricher::from_config(config).context("building enrichment pipeline")?;
    let article = ArticleReference::from_url(url.trim());
    let enriched = enricher.enrich_article(article, stages).await;
    print_json(&enriched)
}

fn feed_query(
    config: &AppConfig,
    query: Option<String>,
    language: Option<String>,
    page_size: Option<u32>,
    page: u32,
) -> FeedQuery {
    FeedQuery {
        query,
        language: language
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| config.feed.default_language.clone()),
        page_size: page_size.unwrap_or(config.feed.default_page_size),
        page,
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{rendered}");
    Ok(())
}

