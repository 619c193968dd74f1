use sqlx::Result;

use crate::common::model::{NewNews, News, PendingNews, NO_IMAGE_FOUND, NO_SUMMARY_FOUND};
use crate::common::Pool;

/// Insert a news article, or update the existing row sharing its URL.
///
/// The URL is the natural key. Content and image follow fill-in semantics:
/// an empty result or a sentinel value never replaces a previously stored
/// non-empty value, so a failed enrichment pass cannot regress an earlier
/// successful one. Concurrent inserts for the same URL resolve through the
/// unique constraint, not an application-level lock.
#[tracing::instrument(skip(db, news), fields(url = %news.url))]
pub async fn upsert_news(db: &Pool, news: &NewNews) -> Result<News> {
    sqlx::query_as::<_, News>(
        r#"
        INSERT INTO news (title, url, content, image, source, published, stock_id)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (url) DO UPDATE SET
            title = CASE
                        WHEN excluded.title <> '' THEN excluded.title
                        ELSE news.title END,
            content = CASE
                          WHEN excluded.content <> '' AND excluded.content <> ?
                              THEN excluded.content
                          ELSE news.content END,
            image = CASE
                        WHEN excluded.image IS NOT NULL AND excluded.image <> ?
                            THEN excluded.image
                        ELSE news.image END,
            source = excluded.source,
            published = excluded.published,
            stock_id = excluded.stock_id
        RETURNING id, title, url, content, image, source, published, stock_id
        "#,
    )
    .bind(&news.title)
    .bind(&news.url)
    .bind(&news.content)
    .bind(&news.image)
    .bind(&news.source)
    .bind(news.published)
    .bind(news.stock_id)
    .bind(NO_SUMMARY_FOUND)
    .bind(NO_IMAGE_FOUND)
    .fetch_one(db)
    .await
}

/// Return the article matching the URL
#[tracing::instrument(skip(db))]
pub async fn get_news_by_url(db: &Pool, url: &str) -> Result<Option<News>> {
    sqlx::query_as::<_, News>(
        r#"
        SELECT id, title, url, content, image, source, published, stock_id
        FROM news WHERE url = ?
        "#,
    )
    .bind(url)
    .fetch_optional(db)
    .await
}

/// Number of rows sharing a URL. The unique constraint keeps this at 0 or 1.
#[tracing::instrument(skip(db))]
pub async fn count_news_with_url(db: &Pool, url: &str) -> Result<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM news WHERE url = ?
        "#,
    )
    .bind(url)
    .fetch_one(db)
    .await
}

/// Articles of selected stocks whose summary is still missing.
///
/// An article counts as pending whether its content is empty or holds the
/// "summary not found" sentinel of a previously failed pass.
#[tracing::instrument(skip(db))]
pub async fn list_pending_enrichment(db: &Pool) -> Result<Vec<PendingNews>> {
    sqlx::query_as::<_, PendingNews>(
        r#"
        SELECT DISTINCT news.url AS url, stocks.name AS stock_name
        FROM news
                 JOIN stocks ON stocks.id = news.stock_id
                 JOIN stock_selections ON stock_selections.stock_id = stocks.id
        WHERE stock_selections.selected = TRUE
          AND (news.content = '' OR news.content = ?)
        "#,
    )
    .bind(NO_SUMMARY_FOUND)
    .fetch_all(db)
    .await
}
