use futures::StreamExt;
use scraper::Html;

use crate::common::model::{NO_IMAGE_FOUND, NO_SUMMARY_FOUND};
use crate::news::extract;
use crate::news::extract::CandidateArticle;
use crate::news::fetch::Fetcher;
use crate::news::summarize::Summarizer;

/// A candidate with its image and summary resolved, possibly to sentinels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedArticle {
    pub title: String,
    pub url: String,
    pub image: String,
    pub content: String,
}

/// Attaches an image and a summary to each candidate article.
///
/// Candidates are independent units of work: one candidate failing its fetch
/// or its summarizer call degrades that candidate to sentinel fields and the
/// batch continues.
#[derive(Clone)]
pub struct Enricher {
    fetcher: Fetcher,
    summarizer: Summarizer,
    concurrency: usize,
}

impl Enricher {
    pub fn new(fetcher: Fetcher, summarizer: Summarizer, concurrency: usize) -> Self {
        Self {
            fetcher,
            summarizer,
            concurrency: concurrency.max(1),
        }
    }

    /// Enrich every candidate with a bounded fan-out.
    ///
    /// The fan-out is order-preserving: output position matches input
    /// position no matter which candidate finishes first.
    #[tracing::instrument(skip_all, fields(candidates = candidates.len()))]
    pub async fn enrich_all(&self, candidates: Vec<CandidateArticle>) -> Vec<EnrichedArticle> {
        futures::stream::iter(candidates)
            .map(|candidate| self.enrich(candidate))
            .buffered(self.concurrency)
            .collect()
            .await
    }

    /// Enrich one candidate. Infallible: failures degrade to sentinels.
    #[tracing::instrument(skip(self, candidate), fields(url = %candidate.url))]
    pub async fn enrich(&self, candidate: CandidateArticle) -> EnrichedArticle {
        let (page_image, summary) = match self.fetcher.fetch(&candidate.url).await {
            Ok(markup) => {
                let (image, text) = {
                    let document = Html::parse_document(&markup);
                    (extract::first_page_image(&document), extract::body_text(&document))
                };

                let summary = match self.summarizer.summarize(&text).await {
                    Ok(summary) => summary,
                    Err(error) => {
                        tracing::warn!("Could not summarize {}: {error}", candidate.url);
                        String::new()
                    }
                };

                (image, summary)
            }
            Err(error) => {
                tracing::warn!("Could not fetch article page {}: {error}", candidate.url);
                (None, String::new())
            }
        };

        // First present value wins: the listing image, then the page's own
        // fallback chain, then the sentinel.
        let image = candidate
            .image
            .or(page_image)
            .unwrap_or_else(|| NO_IMAGE_FOUND.to_owned());

        let content = if summary.is_empty() {
            NO_SUMMARY_FOUND.to_owned()
        } else {
            summary
        };

        EnrichedArticle {
            title: candidate.title,
            url: candidate.url,
            image,
            content,
        }
    }
}
