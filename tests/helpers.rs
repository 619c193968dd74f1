use std::time::Duration;

use secrecy::Secret;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stock_news_api::common::Pool;
use stock_news_api::news::enrich::Enricher;
use stock_news_api::news::extract::ExtractorRules;
use stock_news_api::news::fetch::Fetcher;
use stock_news_api::news::pipeline::NewsPipeline;
use stock_news_api::news::summarize::Summarizer;

/// Pipeline wired against mock servers for the news search and the
/// summarizer. Article pages are expected on the search server too.
pub fn build_pipeline(pool: Pool, search: &MockServer, summarizer: &MockServer) -> NewsPipeline {
    let fetcher = Fetcher::new(Duration::from_secs(2));
    let summarizer = Summarizer::new(
        &format!("{}/v1/chat/completions", summarizer.uri()),
        Secret::new("test-key".to_owned()),
        "gpt-4o-mini",
    );
    let enricher = Enricher::new(fetcher.clone(), summarizer.clone(), 5);

    NewsPipeline::new(
        pool,
        fetcher,
        enricher,
        summarizer,
        ExtractorRules::default(),
        search.uri(),
    )
}

/// Search results markup in the shape the default extractor rules expect.
/// Each entry is a (route, title) pair; URLs point back at `base`.
pub fn listing_html(base: &str, entries: &[(&str, &str)]) -> String {
    let cards: String = entries
        .iter()
        .map(|(route, title)| {
            format!(r#"<div class="news-card"><a class="title" href="{base}{route}">{title}</a></div>"#)
        })
        .collect();

    format!("<html><body>{cards}</body></html>")
}

pub async fn mount_search_page(mock: &MockServer, html: String) {
    Mock::given(method("GET"))
        .and(path("/news/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(mock)
        .await;
}

pub async fn mount_article(mock: &MockServer, route: &str, html: &str, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html.to_owned())
                .set_delay(delay),
        )
        .mount(mock)
        .await;
}

pub async fn mount_summary(mock: &MockServer, summary: &str) {
    let body = json!({
        "choices": [{ "message": { "role": "assistant", "content": summary } }]
    });
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(mock)
        .await;
}

pub async fn mount_failing_summarizer(mock: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(mock)
        .await;
}

pub const ARTICLE_PAGE: &str = "<html><body>Quarterly results and a long analysis.</body></html>";
