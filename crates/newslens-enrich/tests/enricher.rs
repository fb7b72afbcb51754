//! End-to-end enrichment against a mocked article site and inference server.

use std::sync::Arc;

use newslens_core::{
    ArticleReference, EnrichmentPolicy, InferenceConfig, InferenceDevice, SentimentLabel, StageSet,
};
use newslens_enrich::{
    Enricher, HfInferenceClient, InferenceGate, InferenceLimits, Models, EXTRACTION_FAILED_SUMMARY,
    GENERAL_CATEGORY,
};
use newslens_extract::TextExtractor;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SUMMARY: &str = "The council approved an expanded transit budget after a long public debate, adding late night bus routes across the city.";

/// An article page whose paragraphs add up to well over 5,000 characters.
fn article_page() -> String {
    let paragraph = "The regional transit authority approved, after a long and heated debate, a budget that expands late night bus service to every district in the city.";
    let body: String = (0..40).map(|_| format!("<p>{paragraph}</p>")).collect();
    format!(
        r#"<html><body><nav><a href="/">Home</a></nav><article class="story">{body}</article><footer><p>Copyright Example News, all rights reserved, 2024 edition.</p></footer></body></html>"#
    )
}

async fn mount_models(server: &MockServer, sentiment_status: u16) {
    Mock::given(method("POST"))
        .and(path("/models/summarizer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "summary_text": SUMMARY }])))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/models/sentiment"))
        .respond_with(ResponseTemplate::new(sentiment_status).set_body_json(json!([[
            { "label": "POSITIVE", "score": 0.81 },
            { "label": "NEGATIVE", "score": 0.19 }
        ]])))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/models/topics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "labels": ["Politics", "Business", "Sports"],
            "scores": [0.7, 0.2, 0.1]
        })))
        .mount(server)
        .await;
}

fn enricher(server: &MockServer) -> Enricher {
    let inference = Arc::new(
        HfInferenceClient::new(&InferenceConfig {
            base_url: server.uri(),
            api_token: None,
            summarization_model: "summarizer".to_string(),
            sentiment_model: "sentiment".to_string(),
            classification_model: "topics".to_string(),
            device: InferenceDevice::Accelerator,
            timeout_secs: None,
        })
        .expect("inference client"),
    );
    let extractor = TextExtractor::new(5, "newslens-test/0.1", 200).expect("extractor");
    Enricher::new(
        Arc::new(extractor),
        Models {
            summarizer: inference.clone(),
            sentiment: inference.clone(),
            topic: inference,
        },
        &EnrichmentPolicy::default(),
        &InferenceLimits {
            gate: InferenceGate::for_device(InferenceDevice::Accelerator),
            timeout: None,
        },
    )
}

fn reference(url: String) -> ArticleReference {
    ArticleReference {
        title: "Transit budget approved".to_string(),
        description: None,
        url,
        source_name: "Example News".to_string(),
        image_url: None,
        published_at: None,
    }
}

#[tokio::test]
async fn enriches_long_article_with_all_stages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/story"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(article_page(), "text/html"),
        )
        .mount(&server)
        .await;
    mount_models(&server, 200).await;

    let enricher = enricher(&server);
    let result = enricher
        .enrich(&reference(format!("{}/story", server.uri())), StageSet::all())
        .await;

    assert_eq!(result.summary.as_deref(), Some(SUMMARY));
    assert_eq!(result.sentiment.map(|s| s.label), Some(SentimentLabel::Positive));
    assert_eq!(result.category.as_deref(), Some("Politics"));

    let snippet = result.full_text_snippet.expect("snippet");
    assert!(snippet.ends_with("..."));
    assert_eq!(snippet.chars().count(), 203);
    assert!(snippet.starts_with("The regional transit authority approved"));
}

#[tokio::test]
async fn sentiment_server_failure_only_degrades_sentiment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/story"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(article_page(), "text/html"),
        )
        .mount(&server)
        .await;
    mount_models(&server, 500).await;

    let enricher = enricher(&server);
    let result = enricher
        .enrich(&reference(format!("{}/story", server.uri())), StageSet::all())
        .await;

    assert_eq!(result.summary.as_deref(), Some(SUMMARY));
    assert_eq!(result.category.as_deref(), Some("Politics"));
    let sentiment = result.sentiment.expect("fallback sentiment");
    assert_eq!(sentiment.label, SentimentLabel::Neutral);
    assert!(sentiment.score.abs() < f32::EPSILON);
    assert_ne!(result.category.as_deref(), Some(GENERAL_CATEGORY));
}

#[tokio::test]
async fn dead_link_short_circuits_without_inference() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dead"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let enricher = enricher(&server);
    let result = enricher
        .enrich(&reference(format!("{}/dead", server.uri())), StageSet::all())
        .await;

    assert_eq!(result.summary.as_deref(), Some(EXTRACTION_FAILED_SUMMARY));
    assert!(result.full_text_snippet.is_none());
    assert!(result.sentiment.is_none());
    assert!(result.category.is_none());
}
