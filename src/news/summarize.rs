use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

/// Character budget applied to the sanitized input before submission. The
/// upstream service rejects oversized payloads.
const INPUT_CHARACTER_BUDGET: usize = 1_000;

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

#[derive(thiserror::Error, Debug)]
pub enum SummarizerError {
    #[error("Could not reach the summarizer: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Summarizer returned HTTP status {0}")]
    StatusCodeError(u16),
}

/// Gateway to the external text-generation service, one chat-completion
/// request per summary. Retry policy belongs to the caller, not here.
#[derive(Clone, Debug)]
pub struct Summarizer {
    client: Client,
    api_url: String,
    api_key: Secret<String>,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl Summarizer {
    pub fn new(api_url: &str, api_key: Secret<String>, model: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Could not build summarizer HTTP client");

        Self {
            client,
            api_url: api_url.to_owned(),
            api_key,
            model: model.to_owned(),
        }
    }

    /// Ask the external model for a short summary of `text`.
    ///
    /// The input is sanitized and capped first; an input that sanitizes to
    /// nothing short-circuits to an empty summary without any network call.
    /// An empty model answer is a valid low-information result, distinct
    /// from a [`SummarizerError`].
    #[tracing::instrument(skip_all)]
    pub async fn summarize(&self, text: &str) -> Result<String, SummarizerError> {
        let cleaned = sanitize(text);
        if cleaned.is_empty() {
            return Ok(String::new());
        }

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_owned(),
                },
                ChatMessage {
                    role: "user",
                    content: format!(
                        "Summarize the following news content into a short, concise summary of 150 words: \n\n{cleaned}"
                    ),
                },
            ],
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SummarizerError::StatusCodeError(response.status().as_u16()));
        }

        let completion: ChatResponse = response.json().await?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_owned())
            .unwrap_or_default())
    }
}

/// Trim, strip non-alphanumeric characters and cap the length, matching the
/// sanitation the upstream service expects.
fn sanitize(text: &str) -> String {
    text.trim()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(INPUT_CHARACTER_BUDGET)
        .collect()
}
