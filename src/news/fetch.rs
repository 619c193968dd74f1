use std::time::Duration;

use reqwest::Client;

const USER_AGENT: &str = "stock-news-api fetcher (+https://github.com/stock-news/stock-news-api)";

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("Could not fetch {url}: {source}")]
    GetError {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Non OK HTTP status returned for {url}: {status}")]
    StatusCodeError { url: String, status: u16 },
}

/// HTTP document fetcher with a hard per-request timeout, so a slow external
/// host cannot stall a pipeline run indefinitely.
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .expect("Could not build HTTP client");

        Self { client }
    }

    /// Download the document at `url`. Network errors, timeouts and non-2xx
    /// statuses all collapse into a single [`FetchError`]; the caller decides
    /// whether that is fatal or skippable.
    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await.map_err(|source| {
            FetchError::GetError {
                url: url.to_owned(),
                source,
            }
        })?;

        if !response.status().is_success() {
            return Err(FetchError::StatusCodeError {
                url: url.to_owned(),
                status: response.status().as_u16(),
            });
        }

        let content = response.bytes().await.map_err(|source| FetchError::GetError {
            url: url.to_owned(),
            source,
        })?;

        Ok(String::from_utf8_lossy(&content).to_string())
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}
