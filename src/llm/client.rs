use crate::error::{AnalysisError, Result};
use crate::llm::types::*;
use log::{debug, warn};
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when the caller does not pick one.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Upper bound on a single request, connection setup included.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const RETRY_BACKOFF: Duration = Duration::from_millis(500);

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    /// Builds a client from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        Self::new(crate::llm::api_key_from_env()?)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sends one generate call, retrying exactly once on transient failures
    /// (timeouts, connection errors, HTTP 5xx). Auth, quota and other 4xx
    /// responses surface immediately.
    pub async fn generate_content(
        &self,
        model: &str,
        system_instruction: Option<&str>,
        contents: Vec<Content>,
    ) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let payload = GenerateContentRequest {
            contents,
            system_instruction: system_instruction.map(|text| Content::text("user", text)),
        };

        debug!("Calling Gemini model {model}");
        match self.post_generate(&url, &payload).await {
            Err(err) if is_transient(&err) => {
                warn!("Transient Gemini failure, retrying once: {err}");
                sleep(RETRY_BACKOFF).await;
                self.post_generate(&url, &payload).await
            }
            result => result,
        }
    }

    async fn post_generate(&self, url: &str, payload: &GenerateContentRequest) -> Result<String> {
        let res = self.client.post(url).json(payload).send().await?;
        let status = res.status();

        if let Err(err) = res.error_for_status_ref() {
            if status.is_server_error() {
                // Keep the typed transport error so the retry path sees it.
                return Err(err.into());
            }
            let err_text = res.text().await?;
            return Err(AnalysisError::Service(format!(
                "Gemini API error (status {status}): {err_text}"
            )));
        }

        let body: GenerateContentResponse = res.json().await?;
        let text = body
            .candidates
            .ok_or_else(|| AnalysisError::Service("No candidates returned".to_string()))?
            .first()
            .ok_or_else(|| AnalysisError::Service("Empty candidates list".to_string()))?
            .content
            .parts
            .first()
            .ok_or_else(|| AnalysisError::Service("No text parts in content".to_string()))?
            .text
            .clone();

        Ok(text)
    }
}

fn is_transient(err: &AnalysisError) -> bool {
    match err {
        AnalysisError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        _ => false,
    }
}
