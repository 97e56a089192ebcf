//! Google Translate API provider
//!
//! Integrates with Google Translate API v2. One POST is issued per call:
//!
//! ```text
//! POST https://translation.googleapis.com/language/translate/v2?key=<API_KEY>
//! { "q": "...", "source": "ko", "target": "fi", "format": "text" }
//! ```
//!
//! and the answer must look like
//! `{ "data": { "translations": [ { "translatedText": "..." } ] } }`.
//! Anything else is an error; nothing is guessed from a partial body.

use crate::error::{MtError, MtResult};
use crate::language::validate_locale;
use crate::translator::MachineTranslator;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslationsData,
}

#[derive(Debug, Deserialize)]
struct TranslationsData {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

/// Google Translate API v2 provider
#[derive(Clone)]
pub struct GoogleTranslateProvider {
    /// API key for authentication
    api_key: String,
    /// HTTP client for async requests
    client: reqwest::Client,
    /// Endpoint URL, without query string
    base_url: String,
}

impl GoogleTranslateProvider {
    /// Maximum UTF-8 bytes per string (30KB per Google Translate API limits)
    pub const MAX_BYTES_PER_STRING: usize = 30_000;

    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Create a new provider with an explicit API key and the default timeout
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New provider instance
    /// * `Err(MtError)` - If API key is empty or HTTP client creation fails
    pub fn new(api_key: String) -> MtResult<Self> {
        Self::with_timeout(api_key, Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(api_key: String, timeout: Duration) -> MtResult<Self> {
        if api_key.trim().is_empty() {
            return Err(MtError::Config("API key cannot be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MtError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            client,
            base_url: DEFAULT_ENDPOINT.to_string(),
        })
    }

    /// Point the provider at a different endpoint (proxy, test server)
    pub fn with_endpoint(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.base_url
    }

    /// Pull the first `translatedText` out of a response body
    fn parse_response(body: &str) -> MtResult<String> {
        let parsed: TranslateResponse = serde_json::from_str(body).map_err(|e| {
            MtError::InvalidResponse(format!("expected 'data.translations[0].translatedText': {}", e))
        })?;

        parsed
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| {
                MtError::InvalidResponse("'data.translations' array is empty".to_string())
            })
    }
}

impl std::fmt::Debug for GoogleTranslateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslateProvider")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for GoogleTranslateProvider {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        validate_locale(source_locale)?;
        validate_locale(target_locale)?;

        if text.is_empty() {
            return Ok(String::new());
        }

        if text.len() > Self::MAX_BYTES_PER_STRING {
            return Err(MtError::TextTooLong {
                len: text.len(),
                max: Self::MAX_BYTES_PER_STRING,
            });
        }

        let body = json!({
            "q": text,
            "source": source_locale,
            "target": target_locale,
            "format": "text"
        });

        let url = format!("{}?key={}", self.base_url, self.api_key);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                status = status.as_u16(),
                source = source_locale,
                target = target_locale,
                "translation API returned an error status"
            );
            return Err(MtError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let raw = response.text().await?;
        Self::parse_response(&raw)
    }

    fn provider_name(&self) -> &str {
        "Google Translate"
    }
}
