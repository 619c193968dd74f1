use std::collections::HashSet;

use chrono::Utc;
use scraper::Html;
use uuid::Uuid;

use crate::common::model::{NewNews, News};
use crate::common::{news as news_store, stocks, Pool};
use crate::news::enrich::Enricher;
use crate::news::extract::{self, CandidateArticle, ExtractorRules};
use crate::news::fetch::{FetchError, Fetcher};
use crate::news::summarize::{Summarizer, SummarizerError};

/// Provenance tag of articles discovered through the news search.
pub const SEARCH_SOURCE: &str = "Bing News";
/// Provenance tag of articles enriched directly from their own page.
pub const EXTRACTED_SOURCE: &str = "Extracted";

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("Stock not found: {0}")]
    UnknownStock(String),
    #[error("Could not fetch the page: {0}")]
    FetchError(#[from] FetchError),
    #[error("Could not summarize the page: {0}")]
    SummarizerError(#[from] SummarizerError),
    #[error("Database error: {0}")]
    SqlError(#[from] sqlx::Error),
}

/// Drives one stock through search, extraction, enrichment and storage.
///
/// Shared by the on-demand `GET /news` path and the scheduler; both converge
/// on the same URL-keyed upsert, so re-runs are idempotent.
#[derive(Clone)]
pub struct NewsPipeline {
    db: Pool,
    fetcher: Fetcher,
    enricher: Enricher,
    summarizer: Summarizer,
    rules: ExtractorRules,
    search_base_url: String,
}

impl NewsPipeline {
    pub fn new(
        db: Pool,
        fetcher: Fetcher,
        enricher: Enricher,
        summarizer: Summarizer,
        rules: ExtractorRules,
        search_base_url: String,
    ) -> Self {
        Self {
            db,
            fetcher,
            enricher,
            summarizer,
            rules,
            search_base_url: search_base_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn db(&self) -> &Pool {
        &self.db
    }

    /// News search query for a stock, mirroring a browser session against the
    /// external source.
    fn search_url(&self, stock_name: &str) -> String {
        let query = urlencoding::encode(stock_name);
        let cvid = Uuid::new_v4().simple().to_string().to_uppercase();

        format!(
            "{}/news/search?q={query}&qs=n&form=QBNT&sp=-1&lq=0&pq={query}&sc=1-17&sk=&cvid={cvid}&ghsh=0&ghacc=0&ghpl=",
            self.search_base_url
        )
    }

    /// Discover, enrich and store the current news of a stock.
    ///
    /// Fails fast on an unknown stock before any external traffic. Zero
    /// extracted candidates is a valid empty result. Stored rows come back
    /// in discovery order.
    #[tracing::instrument(skip(self))]
    pub async fn run_for_stock(&self, stock_name: &str) -> Result<Vec<News>, PipelineError> {
        let stock = stocks::get_stock_by_name(&self.db, stock_name)
            .await?
            .ok_or_else(|| PipelineError::UnknownStock(stock_name.to_owned()))?;

        let markup = self.fetcher.fetch(&self.search_url(stock_name)).await?;
        let candidates = {
            let document = Html::parse_document(&markup);
            dedupe_by_url(extract::extract(&document, &self.rules))
        };
        tracing::info!("Found {} candidate articles for {stock_name}", candidates.len());

        let enriched = self.enricher.enrich_all(candidates).await;

        let published = Utc::now();
        let mut stored = Vec::with_capacity(enriched.len());
        for article in enriched {
            let row = news_store::upsert_news(
                &self.db,
                &NewNews {
                    title: article.title,
                    url: article.url,
                    content: article.content,
                    image: Some(article.image),
                    source: SEARCH_SOURCE.to_owned(),
                    published,
                    stock_id: stock.id,
                },
            )
            .await?;
            stored.push(row);
        }

        Ok(stored)
    }

    /// Enrich a single article directly from its URL: fetch the page,
    /// summarize its body text and upsert against the row sharing the URL.
    ///
    /// Used by `POST /extract` and by the scheduler's second pass over
    /// articles whose summary is still missing.
    #[tracing::instrument(skip(self))]
    pub async fn extract_one(&self, url: &str, stock_name: &str) -> Result<News, PipelineError> {
        let stock = stocks::get_stock_by_name(&self.db, stock_name)
            .await?
            .ok_or_else(|| PipelineError::UnknownStock(stock_name.to_owned()))?;

        let markup = self.fetcher.fetch(url).await?;
        let text = {
            let document = Html::parse_document(&markup);
            extract::body_text(&document)
        };

        let summary = self.summarizer.summarize(&text).await?;

        // Keep the title of an already discovered article; a page enriched
        // out of the blue only gets a placeholder.
        let title = news_store::get_news_by_url(&self.db, url)
            .await?
            .map(|existing| existing.title)
            .unwrap_or_else(|| format!("News for {}", stock.name));

        let row = news_store::upsert_news(
            &self.db,
            &NewNews {
                title,
                url: url.to_owned(),
                content: summary,
                image: None,
                source: EXTRACTED_SOURCE.to_owned(),
                published: Utc::now(),
                stock_id: stock.id,
            },
        )
        .await?;

        Ok(row)
    }
}

/// Keep the first candidate of each URL, preserving discovery order.
/// Duplicates would collapse in the store anyway; dropping them early avoids
/// enriching the same page twice in one run.
fn dedupe_by_url(candidates: impl Iterator<Item = CandidateArticle>) -> Vec<CandidateArticle> {
    let mut seen = HashSet::new();
    candidates
        .filter(|candidate| seen.insert(candidate.url.clone()))
        .collect()
}
