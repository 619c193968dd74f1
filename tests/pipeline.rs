use std::time::Duration;

use chrono::Utc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stock_news_api::common::model::{NewNews, NO_IMAGE_FOUND, NO_SUMMARY_FOUND};
use stock_news_api::common::{news as news_store, stocks, Pool};
use stock_news_api::news::pipeline::{PipelineError, SEARCH_SOURCE};

use helpers::{
    build_pipeline, listing_html, mount_article, mount_failing_summarizer, mount_search_page,
    mount_summary, ARTICLE_PAGE,
};

mod helpers;

#[sqlx::test(migrations = "./migrations")]
async fn running_twice_stores_each_url_once(pool: Pool) {
    let search = MockServer::start().await;
    let summarizer = MockServer::start().await;
    mount_summary(&summarizer, "a generated summary").await;

    stocks::upsert_stock(&pool, "Infosys", "INFY").await.unwrap();

    let listing = listing_html(
        &search.uri(),
        &[("/article/a", "Infosys beats estimates"), ("/article/b", "Infosys guidance")],
    );
    mount_search_page(&search, listing).await;
    mount_article(&search, "/article/a", ARTICLE_PAGE, Duration::ZERO).await;
    mount_article(&search, "/article/b", ARTICLE_PAGE, Duration::ZERO).await;

    let pipeline = build_pipeline(pool.clone(), &search, &summarizer);

    let first_run = pipeline.run_for_stock("Infosys").await.unwrap();
    let second_run = pipeline.run_for_stock("Infosys").await.unwrap();

    assert_eq!(first_run.len(), 2);
    assert_eq!(second_run.len(), 2);
    assert_eq!(first_run[0].source, SEARCH_SOURCE);

    for article in &first_run {
        assert_eq!(
            news_store::count_news_with_url(&pool, &article.url).await.unwrap(),
            1
        );
    }

    // Converged: the second run returns the same rows.
    let first_urls: Vec<&str> = first_run.iter().map(|a| a.url.as_str()).collect();
    let second_urls: Vec<&str> = second_run.iter().map(|a| a.url.as_str()).collect();
    assert_eq!(first_urls, second_urls);
}

#[sqlx::test(migrations = "./migrations")]
async fn unknown_stock_fails_fast_without_external_traffic(pool: Pool) {
    let search = MockServer::start().await;
    let summarizer = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/news/search"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&search)
        .await;

    let pipeline = build_pipeline(pool, &search, &summarizer);

    let result = pipeline.run_for_stock("NoSuchCo").await;

    assert!(matches!(result, Err(PipelineError::UnknownStock(name)) if name == "NoSuchCo"));
}

#[sqlx::test(migrations = "./migrations")]
async fn failed_enrichment_never_regresses_stored_content(pool: Pool) {
    let search = MockServer::start().await;
    let summarizer = MockServer::start().await;
    mount_failing_summarizer(&summarizer).await;

    let stock = stocks::upsert_stock(&pool, "Infosys", "INFY").await.unwrap();

    let url = format!("{}/article/a", search.uri());
    news_store::upsert_news(
        &pool,
        &NewNews {
            title: "Infosys beats estimates".to_owned(),
            url: url.clone(),
            content: "an earlier good summary".to_owned(),
            image: Some("https://img.example/a.jpg".to_owned()),
            source: SEARCH_SOURCE.to_owned(),
            published: Utc::now(),
            stock_id: stock.id,
        },
    )
    .await
    .unwrap();

    let listing = listing_html(&search.uri(), &[("/article/a", "Infosys beats estimates")]);
    mount_search_page(&search, listing).await;
    mount_article(&search, "/article/a", ARTICLE_PAGE, Duration::ZERO).await;

    let pipeline = build_pipeline(pool.clone(), &search, &summarizer);
    let stored = pipeline.run_for_stock("Infosys").await.unwrap();

    // The summarizer failed, but the earlier enrichment survives.
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].content, "an earlier good summary");
    assert_eq!(stored[0].image.as_deref(), Some("https://img.example/a.jpg"));
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_candidate_urls_collapse_to_one_row(pool: Pool) {
    let search = MockServer::start().await;
    let summarizer = MockServer::start().await;
    mount_summary(&summarizer, "a generated summary").await;

    stocks::upsert_stock(&pool, "Infosys", "INFY").await.unwrap();

    let listing = listing_html(
        &search.uri(),
        &[("/article/a", "First title"), ("/article/a", "Second title")],
    );
    mount_search_page(&search, listing).await;
    mount_article(&search, "/article/a", ARTICLE_PAGE, Duration::ZERO).await;

    let pipeline = build_pipeline(pool.clone(), &search, &summarizer);
    let stored = pipeline.run_for_stock("Infosys").await.unwrap();

    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].title, "First title");

    let url = format!("{}/article/a", search.uri());
    assert_eq!(news_store::count_news_with_url(&pool, &url).await.unwrap(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn discovery_order_survives_uneven_enrichment(pool: Pool) {
    let search = MockServer::start().await;
    let summarizer = MockServer::start().await;
    mount_summary(&summarizer, "a generated summary").await;

    stocks::upsert_stock(&pool, "Infosys", "INFY").await.unwrap();

    let listing = listing_html(
        &search.uri(),
        &[("/article/a", "A"), ("/article/b", "B"), ("/article/c", "C")],
    );
    mount_search_page(&search, listing).await;
    // A completes last, C first.
    mount_article(&search, "/article/a", ARTICLE_PAGE, Duration::from_millis(300)).await;
    mount_article(&search, "/article/b", ARTICLE_PAGE, Duration::from_millis(150)).await;
    mount_article(&search, "/article/c", ARTICLE_PAGE, Duration::ZERO).await;

    let pipeline = build_pipeline(pool, &search, &summarizer);
    let stored = pipeline.run_for_stock("Infosys").await.unwrap();

    let titles: Vec<&str> = stored.iter().map(|article| article.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B", "C"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn one_bad_article_degrades_to_sentinels_and_the_rest_survive(pool: Pool) {
    let search = MockServer::start().await;
    let summarizer = MockServer::start().await;
    mount_summary(&summarizer, "a generated summary").await;

    stocks::upsert_stock(&pool, "Infosys", "INFY").await.unwrap();

    let entries: Vec<(String, String)> = (1..=5)
        .map(|i| (format!("/article/{i}"), format!("Article {i}")))
        .collect();
    let entry_refs: Vec<(&str, &str)> = entries
        .iter()
        .map(|(route, title)| (route.as_str(), title.as_str()))
        .collect();
    mount_search_page(&search, listing_html(&search.uri(), &entry_refs)).await;

    for (route, _) in &entries {
        if route == "/article/3" {
            Mock::given(method("GET"))
                .and(path("/article/3"))
                .respond_with(ResponseTemplate::new(500))
                .mount(&search)
                .await;
        } else {
            mount_article(&search, route, ARTICLE_PAGE, Duration::ZERO).await;
        }
    }

    let pipeline = build_pipeline(pool.clone(), &search, &summarizer);
    let stored = pipeline.run_for_stock("Infosys").await.unwrap();

    assert_eq!(stored.len(), 5);
    for (index, article) in stored.iter().enumerate() {
        if index == 2 {
            assert_eq!(article.content, NO_SUMMARY_FOUND);
            assert_eq!(article.image.as_deref(), Some(NO_IMAGE_FOUND));
        } else {
            assert_eq!(article.content, "a generated summary");
        }
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn empty_listing_is_a_valid_empty_result(pool: Pool) {
    let search = MockServer::start().await;
    let summarizer = MockServer::start().await;

    stocks::upsert_stock(&pool, "Infosys", "INFY").await.unwrap();
    mount_search_page(&search, "<html><body><p>no results</p></body></html>".to_owned()).await;

    let pipeline = build_pipeline(pool, &search, &summarizer);
    let stored = pipeline.run_for_stock("Infosys").await.unwrap();

    assert!(stored.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn extract_one_upserts_by_url(pool: Pool) {
    let pages = MockServer::start().await;
    let summarizer = MockServer::start().await;
    mount_summary(&summarizer, "a direct summary").await;

    let stock = stocks::upsert_stock(&pool, "Infosys", "INFY").await.unwrap();
    mount_article(&pages, "/story", ARTICLE_PAGE, Duration::ZERO).await;

    let pipeline = build_pipeline(pool.clone(), &pages, &summarizer);
    let url = format!("{}/story", pages.uri());

    // First pass creates the row with a placeholder title.
    let created = pipeline.extract_one(&url, "Infosys").await.unwrap();
    assert_eq!(created.title, "News for Infosys");
    assert_eq!(created.source, "Extracted");
    assert_eq!(created.content, "a direct summary");
    assert_eq!(created.stock_id, stock.id);

    // A second pass updates the same row and keeps the title.
    let updated = pipeline.extract_one(&url, "Infosys").await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "News for Infosys");
    assert_eq!(news_store::count_news_with_url(&pool, &url).await.unwrap(), 1);
}
