//! Main-content boundary detection.
//!
//! Two strategies, in order:
//!
//! 1. A schema.org `articleBody` published in JSON-LD, when it is long enough.
//! 2. Paragraph scoring: every `<p>` outside navigation chrome adds a score to
//!    its parent and half of it to its grandparent. The best container, damped
//!    by its link density, plus any sibling that scores close to it, bounds the
//!    article. Its paragraphs, minus link farms, are the extracted text.
//!
//! Anything shorter than the caller's minimum is treated as "no content" so a
//! paywall teaser or a cookie banner never passes for an article.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

/// Paragraphs shorter than this never contribute to container scores.
const MIN_SCORING_PARAGRAPH_CHARS: usize = 25;

/// Paragraphs whose text is mostly anchor text are dropped from the output.
const MAX_PARAGRAPH_LINK_DENSITY: f64 = 0.5;

/// Siblings of the winning container are merged in when they score at least
/// this fraction of it.
const SIBLING_SCORE_RATIO: f64 = 0.2;

const CLASS_WEIGHT: f64 = 25.0;

/// How many levels, counting the paragraph itself, class and id hints are
/// checked for chrome.
const HINT_DEPTH: usize = 3;

/// Elements whose subtree is page chrome, never article text.
const CHROME_TAGS: &[&str] = &[
    "nav", "header", "footer", "aside", "form", "script", "style", "noscript", "figcaption",
    "button", "select",
];

const CHROME_ROLES: &[&str] = &["navigation", "banner", "contentinfo", "complementary", "dialog"];

static POSITIVE_HINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)article|body|content|entry|main|page|post|story|text|blog")
        .expect("valid positive hint regex")
});

static NEGATIVE_HINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)comments?\b|footer|footnote|masthead|meta|nav|outbrain|promo|related|share|shoutbox|sidebar|skyscraper|sponsor|social|subscribe|newsletter|cookie|consent|banner|advert|(^|[\s_-])ad([\s_-]|$)|popup|modal|menu|breadcrumb|widget|paywall",
    )
    .expect("valid negative hint regex")
});

static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid paragraph selector"));

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("valid anchor selector"));

static JSON_LD: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("valid json-ld selector")
});

/// Isolates the main article text of an HTML page.
///
/// Returns `None` when no region of at least `min_chars` characters can be
/// identified. Never returns a partial or garbled fragment: the result is the
/// whole detected article or nothing.
#[must_use]
pub fn extract_main_text(html: &str, min_chars: usize) -> Option<String> {
    let document = Html::parse_document(html);

    if let Some(body) = json_ld_article_body(&document) {
        if body.chars().count() >= min_chars {
            return Some(body);
        }
    }

    let text = scored_article_text(&document)?;
    (text.chars().count() >= min_chars.max(1)).then_some(text)
}

fn scored_article_text(document: &Html) -> Option<String> {
    let mut candidates: Vec<(ElementRef<'_>, f64)> = Vec::new();

    for paragraph in document.select(&PARAGRAPH) {
        if in_page_chrome(paragraph) {
            continue;
        }
        let text = collapse_whitespace(&paragraph.text().collect::<String>());
        let len = text.chars().count();
        if len < MIN_SCORING_PARAGRAPH_CHARS {
            continue;
        }
        let score = paragraph_score(&text, len);

        let mut ancestors = paragraph.ancestors().filter_map(ElementRef::wrap);
        if let Some(parent) = ancestors.next() {
            add_score(&mut candidates, parent, score);
            if let Some(grandparent) = ancestors.next() {
                add_score(&mut candidates, grandparent, score / 2.0);
            }
        }
    }

    let mut best: Option<(ElementRef<'_>, f64)> = None;
    for &(element, score) in &candidates {
        let adjusted = score * (1.0 - link_density(element));
        if best.is_none_or(|(_, top)| adjusted > top) {
            best = Some((element, adjusted));
        }
    }
    let (top, top_score) = best?;
    if top_score <= 0.0 {
        return None;
    }

    let threshold = (top_score * SIBLING_SCORE_RATIO).max(10.0);
    let sections: Vec<ElementRef<'_>> = match top.parent().and_then(ElementRef::wrap) {
        Some(parent) => parent
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|sibling| {
                sibling.id() == top.id()
                    || candidates
                        .iter()
                        .find(|(c, _)| c.id() == sibling.id())
                        .is_some_and(|(c, s)| s * (1.0 - link_density(*c)) >= threshold)
            })
            .collect(),
        None => vec![top],
    };

    let paragraphs: Vec<String> = sections
        .into_iter()
        .flat_map(|section| section.select(&PARAGRAPH).collect::<Vec<_>>())
        .filter(|p| !in_page_chrome(*p))
        .filter(|p| link_density(*p) < MAX_PARAGRAPH_LINK_DENSITY)
        .map(|p| collapse_whitespace(&p.text().collect::<String>()))
        .filter(|t| !t.is_empty())
        .collect();

    if paragraphs.is_empty() {
        return None;
    }
    Some(paragraphs.join("\n\n"))
}

fn add_score<'a>(candidates: &mut Vec<(ElementRef<'a>, f64)>, element: ElementRef<'a>, score: f64) {
    if let Some(entry) = candidates.iter_mut().find(|(c, _)| c.id() == element.id()) {
        entry.1 += score;
    } else {
        candidates.push((element, class_weight(element) + score));
    }
}

/// One point per paragraph, one per comma, up to three for length.
#[allow(clippy::cast_precision_loss)]
fn paragraph_score(text: &str, len: usize) -> f64 {
    let commas = text.matches([',', '，', '、']).count() as f64;
    let length_bonus = (len as f64 / 100.0).min(3.0);
    1.0 + commas + length_bonus
}

fn class_weight(element: ElementRef<'_>) -> f64 {
    let tag_weight = match element.value().name() {
        "article" | "main" => 10.0,
        "div" | "section" => 5.0,
        "td" | "blockquote" | "pre" => 3.0,
        "body" | "html" => 0.0,
        _ => -3.0,
    };
    let Some(hint) = class_and_id(element) else {
        return tag_weight;
    };
    let mut weight = tag_weight;
    if POSITIVE_HINT.is_match(&hint) {
        weight += CLASS_WEIGHT;
    }
    if NEGATIVE_HINT.is_match(&hint) {
        weight -= CLASS_WEIGHT;
    }
    weight
}

fn class_and_id(element: ElementRef<'_>) -> Option<String> {
    let value = element.value();
    let class = value.attr("class").unwrap_or_default();
    let id = value.id().unwrap_or_default();
    if class.is_empty() && id.is_empty() {
        return None;
    }
    Some(format!("{class} {id}"))
}

/// True when `element` or any ancestor is navigation, ads, or other chrome.
///
/// Tags, roles and `hidden` count at any depth. Class and id hints only count
/// on the element's nearest containers, up to the first content container,
/// because outer layout wrappers routinely carry names like `with-sidebar`.
fn in_page_chrome(element: ElementRef<'_>) -> bool {
    let mut hints_apply = true;
    let chain = std::iter::once(element).chain(element.ancestors().filter_map(ElementRef::wrap));
    for (depth, el) in chain.enumerate() {
        let value = el.value();
        let name = value.name();
        if name == "body" || name == "html" {
            return false;
        }
        if CHROME_TAGS.contains(&name) {
            return true;
        }
        if value
            .attr("role")
            .is_some_and(|role| CHROME_ROLES.contains(&role))
        {
            return true;
        }
        if value.attr("hidden").is_some() || value.attr("aria-hidden") == Some("true") {
            return true;
        }
        if hints_apply && depth < HINT_DEPTH {
            if let Some(hint) = class_and_id(el) {
                let positive = POSITIVE_HINT.is_match(&hint);
                if NEGATIVE_HINT.is_match(&hint) && !positive {
                    return true;
                }
                hints_apply = !positive;
            }
        }
        if matches!(name, "article" | "main") {
            hints_apply = false;
        }
    }
    false
}

/// Share of an element's text that sits inside links, in `[0.0, 1.0]`.
#[allow(clippy::cast_precision_loss)]
fn link_density(element: ElementRef<'_>) -> f64 {
    let total: usize = element.text().map(|t| t.trim().chars().count()).sum();
    if total == 0 {
        return 0.0;
    }
    let linked: usize = element
        .select(&ANCHOR)
        .flat_map(|a| a.text())
        .map(|t| t.trim().chars().count())
        .sum();
    (linked as f64 / total as f64).min(1.0)
}

fn json_ld_article_body(document: &Html) -> Option<String> {
    let mut best = String::new();
    for script in document.select(&JSON_LD) {
        let raw = script.text().collect::<String>();
        let Ok(value) = serde_json::from_str::<Value>(raw.trim()) else {
            continue;
        };
        if let Some(candidate) = article_body_from_value(&value) {
            if candidate.len() > best.len() {
                best = candidate;
            }
        }
    }
    (!best.is_empty()).then_some(best)
}

fn article_body_from_value(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => {
            let own = looks_like_article_node(map.get("@type"))
                .then(|| map.get("articleBody").and_then(Value::as_str))
                .flatten()
                .map(normalize_block_text)
                .filter(|body| !body.is_empty());
            map.values()
                .filter_map(article_body_from_value)
                .chain(own)
                .max_by_key(String::len)
        }
        Value::Array(items) => items
            .iter()
            .filter_map(article_body_from_value)
            .max_by_key(String::len),
        _ => None,
    }
}

fn looks_like_article_node(node_type: Option<&Value>) -> bool {
    let is_article = |s: &str| {
        let lower = s.to_ascii_lowercase();
        lower.contains("article") || lower.contains("blogposting") || lower.contains("report")
    };
    match node_type {
        Some(Value::String(s)) => is_article(s),
        Some(Value::Array(values)) => values.iter().filter_map(Value::as_str).any(is_article),
        _ => false,
    }
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapses whitespace within each line and drops blank lines, keeping
/// paragraph breaks.
fn normalize_block_text(input: &str) -> String {
    input
        .lines()
        .map(collapse_whitespace)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(n: usize) -> String {
        format!(
            "Paragraph {n} of the story explains, in some detail, what happened in the city council meeting today."
        )
    }

    fn article_page(paragraphs: usize) -> String {
        let body: String = (0..paragraphs)
            .map(|i| format!("<p>{}</p>", sentence(i)))
            .collect();
        format!(
            r#"<html><head><title>Story</title></head><body>
            <nav class="site-nav"><p>Home, World, Politics, Business, Sports and Technology sections are listed here.</p></nav>
            <div class="sidebar"><p>Trending now: ten things, you will not believe, about celebrities this week.</p></div>
            <article class="story-body">{body}</article>
            <footer><p>Copyright 2024, Example News Corporation, all rights reserved worldwide.</p></footer>
            </body></html>"#
        )
    }

    #[test]
    fn extracts_article_paragraphs_and_drops_chrome() {
        let text = extract_main_text(&article_page(6), 100).expect("article text");
        assert!(text.starts_with("Paragraph 0 of the story"));
        assert!(text.contains("Paragraph 5 of the story"));
        assert!(!text.contains("Trending now"));
        assert!(!text.contains("Copyright"));
        assert!(!text.contains("Home, World"));
        assert_eq!(text.matches("\n\n").count(), 5);
    }

    #[test]
    fn short_page_is_no_content() {
        let html = "<html><body><article><p>Subscribe to keep reading this story today.</p></article></body></html>";
        assert!(extract_main_text(html, 200).is_none());
    }

    #[test]
    fn page_without_paragraphs_is_no_content() {
        let html = r#"<html><body><div id="app"></div><script>window.render()</script></body></html>"#;
        assert!(extract_main_text(html, 1).is_none());
    }

    #[test]
    fn json_ld_article_body_is_preferred() {
        let body = "Lead paragraph of the structured article body.\nSecond line, with more words and detail for readers.";
        let html = format!(
            r#"<html><head><script type="application/ld+json">{{"@context":"https://schema.org","@graph":[{{"@type":"WebPage","name":"x"}},{{"@type":"NewsArticle","headline":"H","articleBody":"{}"}}]}}</script></head>
            <body><p>Short teaser paragraph that should not be used, because JSON-LD wins.</p></body></html>"#,
            body.replace('\n', "\\n")
        );
        let text = extract_main_text(&html, 50).expect("json-ld text");
        assert!(text.starts_with("Lead paragraph of the structured article body."));
        assert!(text.contains("\n\nSecond line"));
        assert!(!text.contains("teaser"));
    }

    #[test]
    fn short_json_ld_body_falls_back_to_scoring() {
        let html = format!(
            r#"<html><head><script type="application/ld+json">{{"@type":"NewsArticle","articleBody":"Too short."}}</script></head>
            <body>{}</body></html>"#,
            article_page(4)
        );
        let text = extract_main_text(&html, 100).expect("scored text");
        assert!(text.contains("Paragraph 3 of the story"));
    }

    #[test]
    fn sibling_blocks_are_merged() {
        let block = |range: std::ops::Range<usize>| -> String {
            let ps: String = range.map(|i| format!("<p>{}</p>", sentence(i))).collect();
            format!(r#"<div class="text-block">{ps}</div>"#)
        };
        let html = format!(
            r#"<html><body><div class="story">{}{}</div></body></html>"#,
            block(0..3),
            block(3..6)
        );
        let text = extract_main_text(&html, 100).expect("merged text");
        assert!(text.contains("Paragraph 0 of the story"));
        assert!(text.contains("Paragraph 5 of the story"));
    }

    #[test]
    fn link_heavy_paragraphs_are_dropped() {
        let html = format!(
            r#"<html><body><article>{}<p><a href="/a">Read more stories about the council, the mayor and the budget</a></p></article></body></html>"#,
            (0..4).map(|i| format!("<p>{}</p>", sentence(i))).collect::<String>()
        );
        let text = extract_main_text(&html, 100).expect("text");
        assert!(!text.contains("Read more stories"));
    }

    fn paragraphs(count: usize) -> String {
        (0..count).map(|i| format!("<p>{}</p>", sentence(i))).collect()
    }

    #[test]
    fn layout_wrapper_named_after_sidebar_keeps_article() {
        let html = format!(
            r#"<html><body><div class="layout with-sidebar">
            <article>{}</article>
            <div class="sidebar"><p>Trending now: ten things, you will not believe, about celebrities this week.</p></div>
            </div></body></html>"#,
            paragraphs(8)
        );
        let text = extract_main_text(&html, 200).expect("article text");
        assert!(text.contains("Paragraph 7 of the story"));
        assert!(!text.contains("Trending now"));
    }

    #[test]
    fn commentary_section_is_article_text() {
        let wrapped = format!(
            r#"<html><body><div class="commentary"><article>{}</article></div></body></html>"#,
            paragraphs(8)
        );
        let bare = format!(
            r#"<html><body><div class="commentary">{}</div></body></html>"#,
            paragraphs(8)
        );
        for html in [wrapped, bare] {
            let text = extract_main_text(&html, 200).expect("commentary text");
            assert!(text.starts_with("Paragraph 0 of the story"));
        }
    }

    #[test]
    fn outer_menu_state_class_does_not_hide_story() {
        let html = format!(
            r#"<html><body><div class="container menu-closed"><div class="story">{}</div></div></body></html>"#,
            paragraphs(8)
        );
        assert!(extract_main_text(&html, 200).is_some());
    }

    #[test]
    fn distant_negative_wrapper_is_ignored() {
        let html = format!(
            r#"<html><body><div class="layout has-menu"><div class="row"><div class="col">{}</div></div></div></body></html>"#,
            paragraphs(8)
        );
        let text = extract_main_text(&html, 200).expect("article text");
        assert!(text.contains("Paragraph 7 of the story"));
    }

    #[test]
    fn comment_thread_next_to_article_is_dropped() {
        let html = format!(
            r#"<html><body><article>{}</article>
            <div class="comments"><p>Great reporting, thanks for covering the council meeting in such detail.</p></div>
            </body></html>"#,
            paragraphs(6)
        );
        let text = extract_main_text(&html, 200).expect("article text");
        assert!(!text.contains("Great reporting"));
    }

    #[test]
    fn link_density_counts_anchor_text_share() {
        let html = Html::parse_fragment(r#"<div><a href="/x">abcd</a>efgh</div>"#);
        let div = html
            .select(&Selector::parse("div").unwrap())
            .next()
            .unwrap();
        assert!((link_density(div) - 0.5).abs() < f64::EPSILON);
    }
}
