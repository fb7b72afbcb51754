//! Integration tests for `TextExtractor`.
//!
//! Each test stands up a `wiremock` server so no real network traffic is made.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use newslens_extract::{ExtractError, TextExtractor};

fn test_extractor() -> TextExtractor {
    TextExtractor::new(5, "newslens-test/0.1", 200).expect("failed to build test TextExtractor")
}

fn article_html() -> String {
    let paragraphs: String = (0..8)
        .map(|i| {
            format!(
                "<p>Paragraph {i}: the regional transit authority approved, after a long debate, a budget that expands bus service.</p>"
            )
        })
        .collect();
    format!(
        r#"<!doctype html><html><head><title>Transit budget</title></head><body>
        <header class="masthead"><p>The Daily Example, your source for local news, weather, and sports.</p></header>
        <nav><ul><li><a href="/">Home</a></li><li><a href="/local">Local</a></li></ul></nav>
        <main><article class="article-body">{paragraphs}</article></main>
        <aside class="related"><p>Related: Council votes on parking, schools reopen, and more local headlines.</p></aside>
        <footer><p>Copyright 2024 The Daily Example, all rights reserved, terms of use apply.</p></footer>
        </body></html>"#
    )
}

#[tokio::test]
async fn extracts_article_text_from_html_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/story"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(article_html(), "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let text = test_extractor()
        .try_extract(&format!("{}/story", server.uri()))
        .await
        .expect("article text");

    assert!(text.starts_with("Paragraph 0: the regional transit authority"));
    assert!(text.contains("Paragraph 7:"));
    assert!(!text.contains("The Daily Example, your source"));
    assert!(!text.contains("Related: Council"));
    assert!(!text.contains("Copyright"));
}

#[tokio::test]
async fn not_found_is_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/gone", server.uri());
    let err = test_extractor().try_extract(&url).await.unwrap_err();
    assert!(
        matches!(err, ExtractError::UnexpectedStatus { status: 404, url: ref u } if *u == url),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn forbidden_page_extracts_to_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/protected"))
        .respond_with(ResponseTemplate::new(403).set_body_string(article_html()))
        .mount(&server)
        .await;

    let text = test_extractor()
        .extract(&format!("{}/protected", server.uri()))
        .await;
    assert!(text.is_none());
}

#[tokio::test]
async fn pdf_response_is_unsupported_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(b"%PDF-1.7 binary".to_vec()),
        )
        .mount(&server)
        .await;

    let err = test_extractor()
        .try_extract(&format!("{}/report.pdf", server.uri()))
        .await
        .unwrap_err();
    assert!(
        matches!(err, ExtractError::UnsupportedContentType { ref content_type, .. } if content_type == "application/pdf"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn paywall_teaser_is_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/paywalled"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(
                    "<html><body><article><p>Subscribe now to continue reading this story.</p></article>\
                     <div class=\"paywall\"><p>Already a subscriber? Sign in to your account here.</p></div></body></html>",
                    "text/html",
                ),
        )
        .mount(&server)
        .await;

    let url = format!("{}/paywalled", server.uri());
    let extractor = test_extractor();
    let err = extractor.try_extract(&url).await.unwrap_err();
    assert!(matches!(err, ExtractError::NoContent { .. }), "got: {err:?}");
    assert!(extractor.extract(&url).await.is_none());
}

#[tokio::test]
async fn unreachable_host_extracts_to_none() {
    // Port 9 (discard) on localhost is closed in test environments.
    let text = test_extractor().extract("http://127.0.0.1:9/story").await;
    assert!(text.is_none());
}

#[tokio::test]
async fn oversized_page_is_body_too_large() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/huge"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(article_html(), "text/html"),
        )
        .mount(&server)
        .await;

    let url = format!("{}/huge", server.uri());
    let extractor = test_extractor().with_max_body_bytes(512);
    let err = extractor.try_extract(&url).await.unwrap_err();
    assert!(
        matches!(err, ExtractError::BodyTooLarge { limit: 512, .. }),
        "got: {err:?}"
    );
    assert!(extractor.extract(&url).await.is_none());

    let roomy = test_extractor().with_max_body_bytes(64 * 1024);
    assert!(roomy.try_extract(&url).await.is_ok());
}
