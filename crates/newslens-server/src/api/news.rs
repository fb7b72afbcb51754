use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Extension, Json,
};
use newslens_core::{ArticleReference, EnrichedArticle, Stage, StageSet};
use newslens_feed::FeedQuery;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_json_rejection, map_query_rejection, ApiError, ApiResponse, AppState, ResponseMeta};

const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Default, Deserialize)]
pub(super) struct SearchParams {
    pub q: Option<String>,
    pub language: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// Comma-separated stage names; absent or empty means headline-only.
    pub stages: Option<String>,
    pub enrich_top: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(super) struct SearchData {
    pub total_results: u64,
    pub articles: Vec<EnrichedArticle>,
}

#[derive(Debug, Deserialize)]
pub(super) struct EnrichRequest {
    pub article: Option<ArticleReference>,
    pub url: Option<String>,
    /// Defaults to every stage when absent.
    pub stages: Option<Vec<Stage>>,
}

pub(super) async fn search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<ApiResponse<SearchData>>, ApiError> {
    let Query(params) = params.map_err(|e| map_query_rejection(req_id.0.clone(), &e))?;

    let stages = StageSet::parse_list(params.stages.as_deref().unwrap_or_default())
        .map_err(|e| ApiError::validation(req_id.0.clone(), e.to_string()))?;

    let page_size = params.page_size.unwrap_or(state.defaults.page_size);
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(ApiError::validation(
            req_id.0,
            format!("page_size must be between 1 and {MAX_PAGE_SIZE}"),
        ));
    }
    let page = params.page.unwrap_or(1);
    if page == 0 {
        return Err(ApiError::validation(req_id.0, "page starts at 1"));
    }

    let query = FeedQuery {
        query: params.q,
        language: params
            .language
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| state.defaults.language.clone()),
        page_size,
        page,
    };

    let headlines = state.feed.fetch(&query).await.map_err(|e| {
        tracing::error!(error = %e, "headline fetch failed");
        ApiError::new(req_id.0.clone(), "upstream_error", "headline provider request failed")
    })?;

    let enrich_top = params.enrich_top.unwrap_or(state.defaults.enrich_top);
    tracing::info!(
        query = query.search_terms().unwrap_or_default(),
        results = headlines.articles.len(),
        stages = %stages,
        enrich_top,
        "serving headline search"
    );
    let articles = state
        .enricher
        .enrich_leading(headlines.articles, stages, enrich_top)
        .await;

    Ok(Json(ApiResponse {
        data: SearchData {
            total_results: headlines.total_results,
            articles,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn enrich(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<EnrichRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<EnrichedArticle>>, ApiError> {
    let Json(body) = body.map_err(|e| map_json_rejection(req_id.0.clone(), &e))?;

    let article = match (body.article, body.url) {
        (Some(article), _) => article,
        (None, Some(url)) => ArticleReference::from_url(url.trim()),
        (None, None) => {
            return Err(ApiError::validation(
                req_id.0,
                "either `article` or `url` is required",
            ));
        }
    };

    if !is_fetchable_url(&article.url) {
        return Err(ApiError::validation(
            req_id.0,
            "article url must be an absolute http(s) URL",
        ));
    }

    let stages = body
        .stages
        .map_or_else(StageSet::all, |stages| stages.into_iter().collect());

    let enriched = state.enricher.enrich_article(article, stages).await;

    Ok(Json(ApiResponse {
        data: enriched,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn is_fetchable_url(raw: &str) -> bool {
    reqwest::Url::parse(raw)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "news_test.rs"]
mod tests;
